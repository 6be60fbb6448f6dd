/// Values that a [`KeyframeTrack`](super::tracks::KeyframeTrack) can hold and
/// blend between adjacent keyframes.
pub trait Interpolatable: Copy + Clone + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}
