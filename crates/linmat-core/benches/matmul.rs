use criterion::{black_box, criterion_group, criterion_main, Criterion};

use linmat_core::random::{uniform_range, Rng};
use linmat_core::{MatmulPolicy, Matrix, MatrixLu};

fn random(rng: &mut Rng, rows: usize, cols: usize) -> Matrix {
    uniform_range(rng, rows, cols, -1.0, 1.0).unwrap()
}

pub fn matmul(c: &mut Criterion) {
    let mut rng = Rng::new(0);
    for n in [31, 64, 100, 128, 256] {
        let a = random(&mut rng, n, n);
        let b = random(&mut rng, n, n);

        c.bench_function(&format!("matmul-naive-{n}"), |bench| {
            let policy = MatmulPolicy::naive();
            bench.iter(|| black_box(&a).matmul_with(black_box(&b), &policy).unwrap())
        });

        c.bench_function(&format!("matmul-strassen-{n}"), |bench| {
            let policy = MatmulPolicy::strassen();
            bench.iter(|| black_box(&a).matmul_with(black_box(&b), &policy).unwrap())
        });
    }
}

pub fn lu(c: &mut Criterion) {
    let mut rng = Rng::new(1);
    for n in [32, 100, 256] {
        let a = random(&mut rng, n, n);

        c.bench_function(&format!("lu-decompose-{n}"), |bench| {
            bench.iter(|| MatrixLu::decompose(black_box(&a)).unwrap())
        });

        let lu = MatrixLu::decompose(&a).unwrap();
        c.bench_function(&format!("lu-inverse-{n}"), |bench| {
            bench.iter(|| black_box(&lu).inverse().unwrap())
        });
    }
}

criterion_group!(benches, matmul, lu);
criterion_main!(benches);
