//! Value and viewport scaling helpers.

/// Zoom limits shared by wheel zoom and viewport fitting.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Screen = graph * k + (x, y).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Axis-aligned box in graph coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	/// Smallest box holding every point, each grown by `radius`.
	pub fn around(points: impl IntoIterator<Item = (f64, f64)>, radius: f64) -> Option<Self> {
		points.into_iter().fold(None, |acc, (x, y)| {
			let b = Bounds {
				min_x: x - radius,
				min_y: y - radius,
				max_x: x + radius,
				max_y: y + radius,
			};
			Some(match acc {
				None => b,
				Some(a) => Bounds {
					min_x: a.min_x.min(b.min_x),
					min_y: a.min_y.min(b.min_y),
					max_x: a.max_x.max(b.max_x),
					max_y: a.max_y.max(b.max_y),
				},
			})
		})
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}
}

/// Linearly map `value` from `[d0, d1]` onto `[r0, r1]`, clamping outside the domain.
pub fn map_data(value: f64, (d0, d1): (f64, f64), (r0, r1): (f64, f64)) -> f64 {
	if d1 == d0 {
		return r0;
	}
	let t = ((value - d0) / (d1 - d0)).clamp(0.0, 1.0);
	r0 + t * (r1 - r0)
}

/// Edge line width for a weight, mapping weights 1..10 onto widths 1..6.
pub fn edge_width(weight: f64) -> f64 {
	map_data(weight, (1.0, 10.0), (1.0, 6.0))
}

/// Transform that centers `bounds` in a `width`×`height` viewport, leaving `padding` on each side.
pub fn fit_transform(bounds: Bounds, width: f64, height: f64, padding: f64) -> ViewTransform {
	let (avail_w, avail_h) = (
		(width - 2.0 * padding).max(1.0),
		(height - 2.0 * padding).max(1.0),
	);
	let k = if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
		1.0
	} else {
		(avail_w / bounds.width()).min(avail_h / bounds.height())
	}
	.clamp(MIN_ZOOM, MAX_ZOOM);
	let (cx, cy) = (
		(bounds.min_x + bounds.max_x) / 2.0,
		(bounds.min_y + bounds.max_y) / 2.0,
	);
	ViewTransform {
		x: width / 2.0 - cx * k,
		y: height / 2.0 - cy * k,
		k,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edge_width_spans_one_to_six() {
		assert_eq!(edge_width(1.0), 1.0);
		assert_eq!(edge_width(10.0), 6.0);
		assert!((edge_width(5.0) - (1.0 + 4.0 * 5.0 / 9.0)).abs() < 1e-9);
	}

	#[test]
	fn edge_width_clamps() {
		assert_eq!(edge_width(0.5), 1.0);
		assert_eq!(edge_width(42.0), 6.0);
	}

	#[test]
	fn bounds_cover_radius() {
		let b = Bounds::around([(0.0, 0.0), (100.0, 50.0)], 10.0).unwrap();
		assert_eq!(
			b,
			Bounds {
				min_x: -10.0,
				min_y: -10.0,
				max_x: 110.0,
				max_y: 60.0
			}
		);
		assert!(Bounds::around(std::iter::empty(), 10.0).is_none());
	}

	#[test]
	fn fit_keeps_padding_on_limiting_axis() {
		let bounds = Bounds {
			min_x: 0.0,
			min_y: 0.0,
			max_x: 200.0,
			max_y: 100.0,
		};
		let t = fit_transform(bounds, 460.0, 460.0, 30.0);
		assert_eq!(t.k, 2.0);
		// Left edge of the box lands exactly on the padding.
		assert_eq!(bounds.min_x * t.k + t.x, 30.0);
		assert_eq!(bounds.max_x * t.k + t.x, 430.0);
		// Shorter axis is centered.
		assert_eq!((bounds.min_y + bounds.max_y) / 2.0 * t.k + t.y, 230.0);
	}

	#[test]
	fn fit_clamps_zoom() {
		let tiny = Bounds {
			min_x: 0.0,
			min_y: 0.0,
			max_x: 1.0,
			max_y: 1.0,
		};
		assert_eq!(fit_transform(tiny, 800.0, 600.0, 30.0).k, MAX_ZOOM);
	}
}
