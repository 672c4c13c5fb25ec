//! Small standalone demo: relax a random point cloud toward uniform density
//! and report how many iterations/re-triangulations it took. Not part of
//! the library's public contract — shows the iteration-cap-driven calling
//! convention external callers are expected to use.

use rand::Rng;

use polyspring::{PointBlock, Polyspring, PolyspringConfig};

const ITERATION_CAP: u32 = 100;

fn main() {
    env_logger::init();

    let n = 200;
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..n)
        .flat_map(|_| [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
        .collect();
    let block = PointBlock {
        data: &data,
        rows: n,
        stride: 2,
        x_col: 0,
        y_col: 1,
    };

    let mut engine = Polyspring::new(PolyspringConfig::default());
    engine.set_points(n, &[block]).expect("valid input");

    let mut keep_going = true;
    for _ in 0..ITERATION_CAP {
        if !keep_going {
            break;
        }
        keep_going = engine.iterate().expect("relaxation step");
    }

    println!(
        "converged={} iterations={} triangulations={}",
        !keep_going,
        engine.iterations(),
        engine.triangulations()
    );
}
