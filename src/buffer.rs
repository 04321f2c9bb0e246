use std::slice;

use log::trace;

use crate::geometry::Scene;

pub struct Buffer<T>
{
    pub width: usize,
    pub height: usize,
    buf: Vec<T>
}

impl <T: Copy> Buffer<T>
{
    pub fn new(width: usize, height: usize, val: T) -> Buffer<T>
    {
        Buffer {
            width,
            height,
            buf: vec![val; width * height]
        }
    }
    pub fn fill(&mut self, val: T)
    {
        for cell in self.buf.iter_mut() {
            *cell = val;
        }
    }
}

impl <T> Buffer<T>
{
    fn get_index(&self, x: usize, y: usize) -> usize
    {
        self.width * y + x
    }
    pub fn set(&mut self, x: usize, y: usize, val: T)
    {
        let index = self.get_index(x, y);
        self.buf[index] = val;
    }
    pub fn get(&self, x: usize, y: usize) -> &T
    {
        &self.buf[self.get_index(x, y)]
    }
    /// Raster coordinates if `(x, y)` lies inside the buffer.
    pub fn clip(&self, x: i64, y: i64) -> Option<(usize, usize)>
    {
        if 0 <= x && x < self.width as i64 && 0 <= y && y < self.height as i64 {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }
    pub fn row_iter(&self, y: usize) -> slice::Iter<'_, T>
    {
        self.buf[y*self.width .. (y+1)*self.width].iter()
    }
    pub fn rows(&self) -> impl Iterator<Item = &[T]>
    {
        self.buf.chunks(self.width.max(1))
    }
}

/// Inverse depth per pixel. Larger values are nearer the camera.
pub type DepthBuffer = Buffer<f64>;

impl DepthBuffer
{
    pub fn for_scene(scene: &Scene) -> DepthBuffer
    {
        Buffer::new(scene.width, scene.height, f64::NEG_INFINITY)
    }
    /// Forgets every sample so any finite depth wins the next test.
    pub fn reset(&mut self)
    {
        trace!("reset {}x{} depth buffer", self.width, self.height);
        self.fill(f64::NEG_INFINITY);
    }
    /// True if `inv_depth` is strictly nearer than what the pixel holds.
    pub fn test(&self, x: usize, y: usize, inv_depth: f64) -> bool
    {
        inv_depth > *self.get(x, y)
    }
    pub fn commit(&mut self, x: usize, y: usize, inv_depth: f64)
    {
        self.set(x, y, inv_depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn clip_bounds() {
        let buf = Buffer::new(4, 3, 0u8);
        assert_eq!(buf.clip(0, 0), Some((0, 0)));
        assert_eq!(buf.clip(3, 2), Some((3, 2)));
        assert_eq!(buf.clip(4, 2), None);
        assert_eq!(buf.clip(3, 3), None);
        assert_eq!(buf.clip(-1, 0), None);
        assert_eq!(buf.clip(0, -1), None);
    }

    #[test]
    fn rows_are_row_major() {
        let mut buf = Buffer::new(3, 2, '.');
        buf.set(2, 0, 'a');
        buf.set(0, 1, 'b');
        let rows: Vec<String> = buf.rows().map(|r| r.iter().collect()).collect();
        assert_eq!(rows, vec!["..a", "b.."]);
        assert_eq!(buf.row_iter(1).collect::<String>(), "b..");
    }

    #[test]
    fn depth_test_is_strict() {
        let scene = Scene::new(2, 2, 1.0, 5.0, Vector3::zeros()).unwrap();
        let mut depth = DepthBuffer::for_scene(&scene);
        assert!(depth.test(1, 1, -1.0e300));
        depth.commit(1, 1, 0.25);
        assert!(!depth.test(1, 1, 0.25));
        assert!(!depth.test(1, 1, 0.2));
        assert!(depth.test(1, 1, 0.3));
        assert!(depth.test(0, 1, 0.2));
    }

    #[test]
    fn reset_forgets_commits() {
        let scene = Scene::new(2, 1, 1.0, 5.0, Vector3::zeros()).unwrap();
        let mut depth = DepthBuffer::for_scene(&scene);
        depth.commit(0, 0, 1.0);
        depth.reset();
        assert!(depth.test(0, 0, 0.5));
        assert_eq!(*depth.get(0, 0), f64::NEG_INFINITY);
    }
}
