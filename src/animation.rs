use crate::geometry::Torus;

/// Starting rotation about X and Z.
pub const START: (f64, f64) = (15.0, 25.0);

/// Rotation added between frames.
pub const STEP: (f64, f64) = (0.07, 0.03);

/// A bounded run of poses. Each item is the torus to draw for one frame.
#[derive(Clone, Debug)]
pub struct Animation
{
    next: Torus,
    step: (f64, f64),
    remaining: usize
}

impl Animation
{
    /// `frames` poses of `torus` beginning at [`START`] and advancing by
    /// [`STEP`].
    pub fn new(torus: Torus, frames: usize) -> Animation
    {
        Animation {
            next: torus.with_angles(START.0, START.1),
            step: STEP,
            remaining: frames
        }
    }
    pub fn starting_at(mut self, a: f64, b: f64) -> Animation
    {
        self.next = self.next.with_angles(a, b);
        self
    }
    pub fn with_step(mut self, da: f64, db: f64) -> Animation
    {
        self.step = (da, db);
        self
    }
}

impl Iterator for Animation
{
    type Item = Torus;

    fn next(&mut self) -> Option<Torus>
    {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let pose = self.next;
        self.next.rotate(self.step.0, self.step.1);
        Some(pose)
    }

    fn size_hint(&self) -> (usize, Option<usize>)
    {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Animation {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn advances_from_start() {
        let poses: Vec<Torus> = Animation::new(Torus::default(), 3).collect();
        assert_eq!(poses.len(), 3);
        assert_eq!((poses[0].a(), poses[0].b()), START);
        assert_relative_eq!(poses[2].a(), 15.14, epsilon = 1e-12);
        assert_relative_eq!(poses[2].b(), 25.06, epsilon = 1e-12);
        assert!(poses.iter().all(|t| t.r1() == 1.0 && t.r2() == 2.0));
    }

    #[test]
    fn cycles_restart_at_start() {
        let anim = Animation::new(Torus::default(), 2).starting_at(0.0, 1.0).with_step(0.5, 0.0);
        assert_eq!(anim.len(), 2);
        let angles: Vec<(f64, f64)> = anim.cycle().take(5).map(|t| (t.a(), t.b())).collect();
        assert_eq!(angles, vec![(0.0, 1.0), (0.5, 1.0), (0.0, 1.0), (0.5, 1.0), (0.0, 1.0)]);
    }

    #[test]
    fn zero_frames() {
        assert_eq!(Animation::new(Torus::default(), 0).next(), None);
    }
}
