use log::debug;

use crate::buffer::DepthBuffer;
use crate::geometry::{Projector, Sample, Scene, Torus};

/// Something that turns lit pixels into marks.
pub trait Sink
{
    /// Offers a sample for pixel `(x, y)`. Returns true if it was drawn; the
    /// depth buffer only records drawn samples.
    fn accept(&mut self, x: usize, y: usize, luminance: f64) -> bool;
}

impl <S: Sink + ?Sized> Sink for &mut S
{
    fn accept(&mut self, x: usize, y: usize, luminance: f64) -> bool
    {
        (**self).accept(x, y, luminance)
    }
}

/// What happened to one projected sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Plot
{
    OffScreen,
    Occluded,
    Rejected,
    Drawn
}

/// Counters for one render pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats
{
    pub swept: usize,
    pub behind_camera: usize,
    pub off_screen: usize,
    pub occluded: usize,
    pub rejected: usize,
    pub drawn: usize
}

impl RenderStats
{
    fn record(&mut self, plot: Plot)
    {
        match plot {
            Plot::OffScreen => self.off_screen += 1,
            Plot::Occluded => self.occluded += 1,
            Plot::Rejected => self.rejected += 1,
            Plot::Drawn => self.drawn += 1
        }
    }
}

/// Depth tests a sample, offers it to the sink, and commits its depth only
/// if the sink drew it.
pub fn plot<S: Sink + ?Sized>(sink: &mut S, depth: &mut DepthBuffer, sample: &Sample) -> Plot
{
    let Some((x, y)) = depth.clip(sample.x, sample.y) else {
        return Plot::OffScreen;
    };
    if !depth.test(x, y, sample.inv_depth) {
        return Plot::Occluded;
    }
    if sink.accept(x, y, sample.luminance) {
        depth.commit(x, y, sample.inv_depth);
        Plot::Drawn
    } else {
        Plot::Rejected
    }
}

/// Draws one pose of `torus` into `sink`.
///
/// `depth` must already be sized to `scene` and reset for this frame; the
/// sink must accept every coordinate inside the scene.
pub fn render<S: Sink + ?Sized>(sink: &mut S, depth: &mut DepthBuffer, torus: &Torus, scene: &Scene) -> RenderStats
{
    debug_assert_eq!((depth.width, depth.height), (scene.width, scene.height), "depth buffer not sized to scene");

    let projector = Projector::new(torus, scene);
    let mut stats = RenderStats::default();
    for (theta, phi) in torus.parameters() {
        stats.swept += 1;
        match projector.project(theta, phi) {
            Some(sample) => stats.record(plot(sink, depth, &sample)),
            None => stats.behind_camera += 1
        }
    }
    debug!(
        "rendered a={:.3} b={:.3}: {} samples, {} drawn, {} occluded, {} rejected, {} off screen, {} behind camera",
        torus.a(), torus.b(), stats.swept, stats.drawn, stats.occluded, stats.rejected, stats.off_screen, stats.behind_camera
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    /// Records every offer, accepting luminance outside `[lo, hi]`.
    struct Band
    {
        lo: f64,
        hi: f64,
        offers: Vec<(usize, usize, f64)>
    }

    impl Band
    {
        fn new(lo: f64, hi: f64) -> Band
        {
            Band { lo, hi, offers: Vec::new() }
        }
    }

    impl Sink for Band
    {
        fn accept(&mut self, x: usize, y: usize, luminance: f64) -> bool
        {
            self.offers.push((x, y, luminance));
            luminance < self.lo || luminance > self.hi
        }
    }

    fn depth(width: usize, height: usize) -> DepthBuffer
    {
        let scene = Scene::new(width, height, 1.0, 5.0, Vector3::zeros()).unwrap();
        DepthBuffer::for_scene(&scene)
    }

    fn sample(x: i64, y: i64, inv_depth: f64, luminance: f64) -> Sample
    {
        Sample { x, y, inv_depth, luminance }
    }

    #[test]
    fn rejected_sample_does_not_block_farther_one()
    {
        let mut sink = Band::new(0.4, 0.6);
        let mut depth = depth(4, 4);

        assert_eq!(plot(&mut sink, &mut depth, &sample(1, 2, 0.5, 0.5)), Plot::Rejected);
        assert_eq!(*depth.get(1, 2), f64::NEG_INFINITY);
        assert_eq!(plot(&mut sink, &mut depth, &sample(1, 2, 0.2, 0.9)), Plot::Drawn);
        assert_eq!(*depth.get(1, 2), 0.2);
        assert_eq!(sink.offers, vec![(1, 2, 0.5), (1, 2, 0.9)]);
    }

    #[test]
    fn nearer_drawn_sample_occludes()
    {
        let mut sink = Band::new(1.0, -1.0);
        let mut depth = depth(4, 4);

        assert_eq!(plot(&mut sink, &mut depth, &sample(0, 0, 0.5, 0.1)), Plot::Drawn);
        assert_eq!(plot(&mut sink, &mut depth, &sample(0, 0, 0.3, 0.2)), Plot::Occluded);
        assert_eq!(plot(&mut sink, &mut depth, &sample(0, 0, 0.5, 0.3)), Plot::Occluded);
        assert_eq!(plot(&mut sink, &mut depth, &sample(0, 0, 0.7, 0.4)), Plot::Drawn);
        assert_eq!(*depth.get(0, 0), 0.7);
        assert_eq!(sink.offers.len(), 2);
    }

    #[test]
    fn off_screen_sample_touches_nothing()
    {
        let mut sink = Band::new(1.0, -1.0);
        let mut depth = depth(4, 3);

        for (x, y) in [(-1, 0), (4, 0), (0, 3), (0, -1), (i64::MAX, i64::MIN)] {
            assert_eq!(plot(&mut sink, &mut depth, &sample(x, y, 1.0, 1.0)), Plot::OffScreen);
        }
        assert!(sink.offers.is_empty());
        assert!(depth.rows().flatten().all(|d| *d == f64::NEG_INFINITY));
    }

    #[test]
    fn stats_account_for_every_sample()
    {
        let torus = Torus::default().with_angles(1.0, 2.0);
        let scene = Scene::fitted(30, 20, 5.0, Vector3::new(0.0, 1.0, -1.0), &torus).unwrap();
        let mut sink = Band::new(f64::NEG_INFINITY, 0.0);
        let mut depth = DepthBuffer::for_scene(&scene);

        let stats = render(&mut sink, &mut depth, &torus, &scene);
        assert_eq!(stats.swept, torus.parameters().count());
        assert_eq!(
            stats.swept,
            stats.behind_camera + stats.off_screen + stats.occluded + stats.rejected + stats.drawn
        );
        assert_eq!(stats.behind_camera, 0);
        assert_eq!(stats.off_screen, 0);
        assert_eq!(sink.offers.len(), stats.rejected + stats.drawn);
        assert!(stats.drawn > 0);
        assert!(stats.rejected > 0);
    }
}
