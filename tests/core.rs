use briny_math::approx::approx_eq;
use briny_math::mode::{Mode, mode, set_mode};
use briny_math::*;

#[test]
fn test_unary_ops_apply_pointwise() {
    let x = [-4.0f32, -0.0, 0.0, 2.5];
    let mut y = [0.0f32; 4];

    sign(&x, &mut y);
    assert_eq!(y, [-1.0, 0.0, 0.0, 1.0]);

    sgnbit(&x, &mut y);
    assert_eq!(y, [1.0, 1.0, 0.0, 0.0]);

    fabs(&x, &mut y);
    assert_eq!(y, [4.0, 0.0, 0.0, 2.5]);
}

#[test]
fn test_set_fills_constant() {
    for len in [1usize, 7, 5000] {
        let mut y = vec![3.0f64; len];
        set(0.0, &mut y);
        assert!(y.iter().all(|&v| v == 0.0));
        set(1.25, &mut y);
        assert!(y.iter().all(|&v| v == 1.25));
    }

    let mut ints = [9i32; 3];
    set(-2, &mut ints);
    assert_eq!(ints, [-2; 3]);
}

#[test]
fn test_copy_matches_source() {
    let src: Vec<u64> = (0..100).collect();
    let mut dst = vec![0u64; 100];
    copy(&src, &mut dst);
    assert_eq!(dst, src);
}

#[test]
fn test_copy_raw_aliased_is_noop() {
    let mut buf = [1.0f64, 2.0, 3.0];
    let before = buf;
    let p = buf.as_mut_ptr();
    unsafe { copy_raw(3, p.cast_const(), p) };
    assert_eq!(buf, before);
}

#[test]
fn test_copy_in_gpu_mode_produces_same_result() {
    // without a usable device the copy falls back to host memory
    set_mode(Mode::Gpu);
    let src = [1.5f32, -2.0, 8.0, 0.0];
    let mut dst = [0.0f32; 4];
    copy(&src, &mut dst);
    set_mode(Mode::Cpu);
    assert_eq!(dst, src);
    assert_eq!(mode(), Mode::Cpu);
}

#[test]
fn test_dot_product() {
    assert_eq!(dot(&[1.0f32, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
    assert_eq!(dot(&[1.0f64, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
}

#[test]
fn test_gemm_identity() {
    let eye = [1.0f32, 0.0, 0.0, 1.0];
    let b = [0.5f32, -1.0, 2.0, 4.0];
    let mut c = [0.0f32; 4];
    gemm(Transpose::NoTrans, Transpose::NoTrans, 2, 2, 2, 1.0, &eye, &b, 0.0, &mut c);
    assert_eq!(c, b);

    // Bᵀ · I = Bᵀ
    let mut ct = [0.0f32; 4];
    gemm(Transpose::Trans, Transpose::NoTrans, 2, 2, 2, 1.0, &b, &eye, 0.0, &mut ct);
    assert_eq!(ct, [0.5, 2.0, -1.0, 4.0]);
}

#[test]
fn test_gemm_matches_naive_product() {
    let (m, n, k) = (5, 3, 4);
    let a: Vec<f64> = (0..m * k).map(|i| f64::from(i as u32) * 0.25 - 1.0).collect();
    let b: Vec<f64> = (0..k * n).map(|i| f64::from(i as u32).sin()).collect();
    let mut c = vec![0.0f64; m * n];
    gemm(Transpose::NoTrans, Transpose::NoTrans, m, n, k, 1.0, &a, &b, 0.0, &mut c);

    let mut naive = vec![0.0f64; m * n];
    for i in 0..m {
        for j in 0..n {
            naive[i * n + j] = (0..k).map(|p| a[i * k + p] * b[p * n + j]).sum();
        }
    }
    assert!(approx_eq(&c[..], &naive[..]));
}

#[test]
fn test_gemv_agrees_with_gemm() {
    let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2x3
    let x = [0.5f64, -1.0, 2.0];
    let mut y = [0.0f64; 2];
    gemv(Transpose::NoTrans, 2, 3, 1.0, &a, &x, 0.0, &mut y);

    let mut c = [0.0f64; 2];
    gemm(Transpose::NoTrans, Transpose::NoTrans, 2, 1, 3, 1.0, &a, &x, 0.0, &mut c);
    assert_eq!(y, c);
}

#[test]
fn test_vector_math_chain() {
    // exp(ln(x)^2 / 2) with the vectorized ops
    let x = [1.0f64, 2.0, 4.0];
    let mut t = [0.0f64; 3];
    let mut u = [0.0f64; 3];
    ln(&x, &mut t);
    sqr(&t, &mut u);
    scal(0.5, &mut u);
    exp(&u, &mut t);

    let expected: Vec<f64> = x.iter().map(|v: &f64| (v.ln().powi(2) / 2.0).exp()).collect();
    assert!(approx_eq(&t[..], &expected[..]));
}

#[test]
fn test_next_after_is_minimal() {
    for b in [0.0f64, 1.0, -2.5, 1e300, -1e-300] {
        let up = next_after(b);
        assert!(up > b);
        // one step in the ordered bit space
        let expected = if b >= 0.0 {
            f64::from_bits(b.to_bits() + 1)
        } else {
            f64::from_bits(b.to_bits() - 1)
        };
        assert_eq!(up, expected);
    }
}

#[test]
#[should_panic(expected = "axpby: length mismatch, expected 3, got 2")]
fn test_axpby_length_mismatch_panics() {
    let mut y = [0.0f32; 2];
    axpby(1.0, &[1.0, 2.0, 3.0], 1.0, &mut y);
}

#[test]
fn test_empty_buffer_panics() {
    let result = std::panic::catch_unwind(|| {
        let _ = asum::<f64>(&[]);
    });
    assert!(result.is_err());
}
