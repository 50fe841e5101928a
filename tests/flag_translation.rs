use briny_blas::approx::{ApproxEquality, approx_within};
use briny_blas::backend::{ActiveBackend, Backend, TrmvBackend, active_backend};
use briny_blas::dtype::{Complex64, Scalar};
use briny_blas::ops::reference::Reference;
use briny_blas::ops::translate::{BackendScalar, Convention, Order, Trans, Uplo, translate};
use briny_blas::ops::{Diagonal, OpFlags, Transpose, Triangle, cpu};
use briny_blas::storage::StorageOrder;
use briny_blas::tensors::{DenseMatrix, DenseVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

const N: usize = 6;

fn random_f64(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.random_range(-2.0..2.0)).collect()
}

/// Applies `flags` through translation and a direct backend call.
fn through_backend<B: TrmvBackend, T: BackendScalar>(
    a: &[T],
    order: StorageOrder,
    convention: Convention,
    flags: OpFlags,
    x: &mut [T],
) {
    let params = translate(flags, order, convention);
    T::backend_trmv::<B>(params, x.len(), a, x.len(), x, 1);
}

fn through_fallback<T: Scalar + briny_blas::dtype::FromElement<T>>(a: &[T], order: StorageOrder, flags: OpFlags, x: &mut [T]) {
    let n = x.len();
    let m = DenseMatrix::new(a, n, n, order).unwrap();
    cpu::trmv(&m, &mut DenseVector::new(x), flags);
}

#[rstest]
fn test_translation_round_trip(
    #[values(StorageOrder::RowMajor, StorageOrder::ColumnMajor)] order: StorageOrder,
    #[values(
        Convention::Any,
        Convention::Native(StorageOrder::RowMajor),
        Convention::Native(StorageOrder::ColumnMajor)
    )]
    convention: Convention,
) {
    let mut rng = StdRng::seed_from_u64(3);
    let a = random_f64(&mut rng, N * N);
    let x0 = random_f64(&mut rng, N);
    for flags in OpFlags::ALL {
        let mut translated = x0.clone();
        through_backend::<Reference, f64>(&a, order, convention, flags, &mut translated);
        let mut direct = x0.clone();
        through_fallback(&a, order, flags, &mut direct);
        assert!(
            approx_within(&translated[..], &direct[..], ApproxEquality::Partial),
            "{flags} {order:?} {convention:?}"
        );
    }
}

#[test]
fn test_complex_round_trip_through_native_view() {
    let mut rng = StdRng::seed_from_u64(5);
    let a: Vec<Complex64> = (0..N * N)
        .map(|_| Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect();
    let x0: Vec<Complex64> = (0..N)
        .map(|_| Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect();
    let convention = Convention::Native(StorageOrder::ColumnMajor);
    for flags in OpFlags::ALL {
        let mut translated = x0.clone();
        let order = StorageOrder::RowMajor;
        through_backend::<Reference, Complex64>(&a, order, convention, flags, &mut translated);
        let mut direct = x0.clone();
        through_fallback(&a, StorageOrder::RowMajor, flags, &mut direct);
        assert!(approx_within(&translated[..], &direct[..], ApproxEquality::Relative), "{flags}");
    }
}

#[test]
fn test_row_major_to_column_native_inverts_triangle() {
    let flags = OpFlags::new(Triangle::Lower, Diagonal::Unit, Transpose::NoTrans);
    let column_native = Convention::Native(StorageOrder::ColumnMajor);
    let p = translate(flags, StorageOrder::RowMajor, column_native);
    assert_eq!((p.order, p.uplo, p.trans), (Order::ColMajor, Uplo::Upper, Trans::Trans));
    let p = translate(flags, StorageOrder::ColumnMajor, column_native);
    assert_eq!((p.order, p.uplo, p.trans), (Order::ColMajor, Uplo::Lower, Trans::NoTrans));
}

#[test]
fn test_active_backend_is_reported() {
    let expected = if cfg!(feature = "blas") { Backend::Cblas } else { Backend::Reference };
    assert_eq!(active_backend(), expected);
    assert_eq!(active_backend().to_string(), ActiveBackend::NAME);
}
