use crate::V2;

/// Hard position bounds. Applied to every particle, pinned included.
#[derive(Clone)]
pub struct PosBox {
	pub xmin: f32,
	pub xmax: f32,
	pub ymin: f32,
	pub ymax: f32,
}

impl PosBox {
	/// Screen-style box: [0, width] x [0, height], y growing downwards.
	pub fn from_size(width: f32, height: f32) -> Self {
		Self {
			xmin: 0.,
			xmax: width,
			ymin: 0.,
			ymax: height,
		}
	}

	pub fn apply(&self, pos: &mut V2) -> bool {
		let mut flag = false;
		if pos[0] < self.xmin {
			pos[0] = self.xmin;
			flag = true;
		} else if pos[0] > self.xmax {
			pos[0] = self.xmax;
			flag = true;
		};
		if pos[1] < self.ymin {
			pos[1] = self.ymin;
			flag = true;
		} else if pos[1] > self.ymax {
			pos[1] = self.ymax;
			flag = true;
		};
		flag
	}
}
