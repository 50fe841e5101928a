use briny_blas::BlasError;
use briny_blas::approx::{ApproxEquality, approx_within};
use briny_blas::modelio::{load_normalizer, read_normalizer, save_normalizer, write_normalizer};
use briny_blas::models::Normalizer;
use briny_blas::tensors::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_eval_matches_elementwise_affine_map() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(17);
    let dim = 12;
    let batch = 257;
    let diagonal: Vec<f64> = (0..dim).map(|_| rng.random_range(0.1..3.0)).collect();
    let offset: Vec<f64> = (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect();
    let data: Vec<f64> = (0..dim * batch).map(|_| rng.random_range(-5.0..5.0)).collect();

    let model = Normalizer::with_offset(diagonal.clone(), offset.clone()).unwrap();
    let input = Tensor::new(vec![batch, dim], data.clone());
    let out = model.eval(&input).unwrap();

    let expected: Vec<f64> = data
        .iter()
        .enumerate()
        .map(|(k, &v)| diagonal[k % dim] * v + offset[k % dim])
        .collect();
    assert_eq!(out.shape, vec![batch, dim]);
    assert!(approx_within(&out.data[..], &expected[..], ApproxEquality::Precise));
}

#[test]
fn test_eval_without_offset_and_empty_batch() {
    let model = Normalizer::from_diagonal(vec![2.0, -1.0]);
    let out = model.eval(&Tensor::from_rows(&[vec![3.0, 4.0]])).unwrap();
    assert_eq!(out.data, vec![6.0, -4.0]);

    let empty = Tensor::new(vec![0, 2], Vec::new());
    assert_eq!(model.eval(&empty).unwrap(), empty);
}

#[test]
fn test_eval_rejects_wrong_dimension() {
    let model = Normalizer::new(3, true);
    let err = model.eval(&Tensor::from_rows(&[vec![1.0, 2.0]])).unwrap_err();
    assert!(matches!(err, BlasError::SizeMismatch { expected: 3, got: 2 }));
}

#[test]
fn test_parameters_drive_eval() {
    let mut model = Normalizer::new(2, true);
    model.set_parameter_vector(&[2.0, 4.0, 1.0, -1.0]).unwrap();
    let out = model.eval(&Tensor::from_rows(&[vec![1.0, 1.0]])).unwrap();
    assert_eq!(out.data, vec![3.0, 3.0]);

    model.set_structure(2, false);
    assert_eq!(model.number_of_parameters(), 2);
    let out = model.eval(&Tensor::from_rows(&[vec![1.0, 1.0]])).unwrap();
    assert_eq!(out.data, vec![2.0, 4.0]);
}

#[test]
fn test_write_read_in_memory() {
    for model in [
        Normalizer::from_diagonal(vec![0.5, 2.0, 8.0]),
        Normalizer::with_offset(vec![1.0, 3.0], vec![-0.25, 0.75]).unwrap(),
        Normalizer::new(0, false),
    ] {
        let mut bytes = Vec::new();
        write_normalizer(&mut bytes, &model).unwrap();
        let back = read_normalizer(&mut bytes.as_slice()).unwrap();
        assert_eq!(back, model);
    }
}

#[test]
fn test_save_and_load_file() {
    init_logger();
    let name = format!("briny_blas_normalizer_{}.bnrm", std::process::id());
    let path = std::env::temp_dir().join(name);
    let model = Normalizer::with_offset(vec![1.5, -2.0, 0.125], vec![0.0, 1.0, 2.0]).unwrap();

    save_normalizer(&path, &model).unwrap();
    let loaded = load_normalizer(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, model);
    assert_eq!(loaded.name(), "Normalizer");
}

#[test]
fn test_load_missing_file_fails() {
    let path = std::env::temp_dir().join("briny_blas_does_not_exist.bnrm");
    assert!(load_normalizer(path).is_err());
}
