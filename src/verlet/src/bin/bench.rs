use std::time::SystemTime;
use verlet::cworld::CWorld;

fn main() {
	let start = SystemTime::now();
	let mut cworld = CWorld::default();
	let rframes = 10000;
	for _ in 0..rframes {
		cworld.run();
	}
	let time = rframes as f32 * cworld.dt;
	let duration = SystemTime::now().duration_since(start).unwrap().as_micros();
	eprintln!("{:.3}%", duration as f32 / time / 1e4);
}
