// Benchmarks for the validation and alignment pipeline
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use resrec::{reconcile, EncodedVector, ModelBundle, ModelSchema, PredictionRequest, Predictor};

fn generate_bundle(cities: usize, cuisines: usize) -> ModelBundle {
    let city_names: Vec<String> = (0..cities).map(|i| format!("City {}", i)).collect();
    let cuisine_names: Vec<String> = (0..cuisines).map(|i| format!("Cuisine {}", i)).collect();

    let mut features = Vec::new();
    features.extend(city_names.iter().map(|c| format!("City_{}", c)));
    features.extend(cuisine_names.iter().map(|c| format!("Cuisine_{}", c)));

    let mut rng = rand::rng();
    let coefficients: Vec<f64> = features.iter().map(|_| rng.random_range(-1.0..1.0)).collect();

    let raw = serde_json::json!({
        "encoder": {
            "fields": [
                {"name": "Location", "categories": ["0", "Central"]},
                {"name": "Locality", "categories": ["0", "Block A"]},
                {"name": "City", "categories": city_names},
                {"name": "Cuisine", "categories": cuisine_names}
            ]
        },
        "model": {
            "intercept": 3.0,
            "features": features,
            "coefficients": coefficients
        }
    });
    ModelBundle::from_json(&raw.to_string()).unwrap()
}

fn generate_requests(predictor: &Predictor, count: usize) -> Vec<PredictionRequest> {
    let mut rng = rand::rng();
    let vocabulary = predictor.vocabulary();
    let cities = vocabulary.values(resrec::Field::City);
    let cuisines = vocabulary.values(resrec::Field::Cuisine);

    (0..count)
        .map(|i| {
            // every fourth request is unknown input and takes the substitution path
            let city = if i % 4 == 0 {
                "Atlantis".to_string()
            } else {
                cities.choose(&mut rng).unwrap().clone()
            };
            let cuisine = cuisines.choose(&mut rng).unwrap().clone();
            PredictionRequest::new(city, cuisine)
        })
        .collect()
}

fn benchmark_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");

    for size in [10, 100, 1000].iter() {
        let predictor = generate_bundle(*size, *size).into_predictor().unwrap();
        let requests = generate_requests(&predictor, 256);

        group.bench_with_input(BenchmarkId::new("categories", size), size, |b, _| {
            b.iter(|| {
                for request in &requests {
                    black_box(predictor.predict(black_box(request)).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn benchmark_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for width in [64, 1024, 16384].iter() {
        let columns: Vec<String> = (0..*width).map(|i| format!("feature_{}", i)).collect();
        let schema = ModelSchema::new(columns.iter().cloned()).unwrap();
        let encoded: EncodedVector = columns
            .iter()
            .step_by(7)
            .map(|c| (c.clone(), 1.0))
            .chain(std::iter::once(("unseen".to_string(), 1.0)))
            .collect();

        group.bench_with_input(BenchmarkId::new("schema_width", width), width, |b, _| {
            b.iter(|| black_box(reconcile(black_box(&encoded), &schema).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_predict, benchmark_reconcile);
criterion_main!(benches);
