use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, SystemTime};

use crate::cloth::{ClothConfig, ClothMesh, StepParams};
use crate::controller_message::ControllerMessage;
use crate::V2;
use protocol::pr_model::PrModel;

/// Frame driver around a [`ClothMesh`]: owns the timestep and per-step
/// parameters, paces a real-time loop and applies controller input
/// strictly between steps.
pub struct CWorld {
	pub dt: f32,
	pub time_scale: f32,

	// -1: always play
	// 0: pause
	// n: play n frames
	forward_frames: i32,

	tear_tolerance: f32,
	params: StepParams,
	mesh: ClothMesh,
}

impl Default for CWorld {
	fn default() -> Self {
		Self {
			dt: 0.1,
			// 60 fps wall clock at the default dt
			time_scale: 1. / 6.,
			forward_frames: -1,
			tear_tolerance: 5.,
			params: StepParams::default(),
			mesh: ClothMesh::new(&ClothConfig::default()),
		}
	}
}

impl CWorld {
	pub fn with_dt(mut self, dt: f32) -> Self {
		self.dt = dt;
		self
	}

	pub fn with_time_scale(mut self, time_scale: f32) -> Self {
		self.time_scale = time_scale;
		self
	}

	pub fn with_paused(mut self) -> Self {
		self.forward_frames = 1; // provide first frame
		self
	}

	pub fn with_config(mut self, config: &ClothConfig) -> Self {
		self.mesh = ClothMesh::new(config);
		self
	}

	pub fn with_params(mut self, params: StepParams) -> Self {
		self.params = params;
		self
	}

	pub fn with_gravity(mut self, gravity: V2) -> Self {
		self.params.gravity = gravity;
		self
	}

	pub fn with_tear_tolerance(mut self, tolerance: f32) -> Self {
		self.tear_tolerance = tolerance;
		self
	}

	pub fn mesh(&self) -> &ClothMesh {
		&self.mesh
	}

	/// One simulation frame.
	pub fn run(&mut self) {
		self.mesh.step(self.dt, &self.params);
	}

	pub fn tear(&mut self, pos: V2) -> bool {
		self.mesh.tear(pos, self.tear_tolerance)
	}

	pub fn pr_model(&self) -> PrModel {
		self.mesh.pr_model()
	}

	/// Real-time loop: one snapshot per frame over `tx`, controller
	/// messages drained from `rx` between frames. Tears never interleave
	/// with a relaxation pass.
	pub fn run_thread(
		&mut self,
		tx: Sender<PrModel>,
		rx: Receiver<ControllerMessage>,
	) {
		let mut start_time = SystemTime::now();
		let rtime: u64 = (self.dt * 1e6 * self.time_scale) as u64;
		let mut first_frame = true;
		loop {
			if self.forward_frames != 0 {
				if self.forward_frames > 0 {
					self.forward_frames -= 1;
				}
				if !first_frame {
					self.run();
				} else {
					first_frame = false;
				}
				let model = self.pr_model();
				tx.send(model).unwrap();
			}

			let next_time = SystemTime::now();
			let dt = next_time.duration_since(start_time).unwrap().as_micros()
				as u64;
			while let Ok(msg) = rx.try_recv() {
				match msg {
					ControllerMessage::TogglePause => {
						if self.forward_frames == 0 {
							self.forward_frames = -1;
						} else {
							self.forward_frames = 0;
						}
					}
					ControllerMessage::FrameForward => {
						if self.forward_frames == 0 {
							self.forward_frames += 1;
						}
					}
					ControllerMessage::Tear(pos) => {
						self.tear(V2::new(pos[0], pos[1]));
					}
				}
			}
			if dt < rtime {
				std::thread::sleep(Duration::from_micros(rtime - dt));
			}
			start_time = next_time;
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_default_world_runs() {
		let mut cworld = CWorld::default();
		for _ in 0..20 {
			cworld.run();
		}
		let model = cworld.pr_model();
		assert_eq!(model.particles.len(), 100);
		assert_eq!(model.links.len(), 180);
		for p in model.particles.iter() {
			assert!(p.pos[0].is_finite());
			assert!(p.pos[1].is_finite());
		}
	}

	#[test]
	fn test_tear_between_frames() {
		let mut cworld = CWorld::default().with_gravity(V2::new(0., 0.));
		cworld.run();
		// midpoint of the first horizontal link of the default grid
		let origin = V2::new(1080. / 3., 640. / 3.);
		assert!(cworld.tear(origin + V2::new(15., 0.)));
		cworld.run();
		assert_eq!(cworld.pr_model().links.len(), 179);
	}
}
