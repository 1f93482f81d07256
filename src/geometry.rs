use rand::Rng;
use wgpu::util::DeviceExt;

/// Number of vertices in the rectangle (two triangles).
pub const VERTEX_COUNT: usize = 6;

pub const HALF_WIDTH: f32 = 150.0;
pub const HALF_HEIGHT: f32 = 100.0;

/// Rectangle centered on the origin, in local pixel units.
pub const RECTANGLE_POSITIONS: [[f32; 2]; VERTEX_COUNT] = [
    [-HALF_WIDTH, -HALF_HEIGHT],
    [HALF_WIDTH, -HALF_HEIGHT],
    [-HALF_WIDTH, HALF_HEIGHT],
    [HALF_WIDTH, -HALF_HEIGHT],
    [-HALF_WIDTH, HALF_HEIGHT],
    [HALF_WIDTH, HALF_HEIGHT],
];

pub type VertexColors = [[f32; 4]; VERTEX_COUNT];

/// One opaque color per vertex, each RGB channel drawn from [0, 1).
pub fn random_colors<R: Rng + ?Sized>(rng: &mut R) -> VertexColors {
    let mut colors = [[0.0; 4]; VERTEX_COUNT];
    for color in colors.iter_mut() {
        *color = [rng.gen(), rng.gen(), rng.gen(), 1.0];
    }
    colors
}

/// Static vertex data for the rectangle, uploaded once at startup.
///
/// Positions and colors live in separate tightly packed buffers bound to
/// vertex slots 0 and 1.
pub struct GeometryBuffers {
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
}

impl GeometryBuffers {
    pub const POSITION_SLOT: u32 = 0;
    pub const COLOR_SLOT: u32 = 1;

    pub fn new(device: &wgpu::Device, colors: &VertexColors) -> Self {
        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Position Buffer"),
            contents: bytemuck::cast_slice(&RECTANGLE_POSITIONS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let colors = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Color Buffer"),
            contents: bytemuck::cast_slice(colors),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self { positions, colors }
    }

    pub fn vertex_count(&self) -> u32 {
        VERTEX_COUNT as u32
    }

    /// Binds both buffers to their vertex slots.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(Self::POSITION_SLOT, self.positions.slice(..));
        pass.set_vertex_buffer(Self::COLOR_SLOT, self.colors.slice(..));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rectangle_is_centered_on_origin() {
        let sum = RECTANGLE_POSITIONS
            .iter()
            .fold([0.0f32; 2], |acc, p| [acc[0] + p[0], acc[1] + p[1]]);
        assert_eq!(sum, [0.0, 0.0]);
    }

    #[test]
    fn test_rectangle_spans_half_extents() {
        let xs = RECTANGLE_POSITIONS.iter().map(|p| p[0]);
        let ys = RECTANGLE_POSITIONS.iter().map(|p| p[1]);
        assert_eq!(xs.clone().fold(f32::MAX, f32::min), -HALF_WIDTH);
        assert_eq!(xs.fold(f32::MIN, f32::max), HALF_WIDTH);
        assert_eq!(ys.clone().fold(f32::MAX, f32::min), -HALF_HEIGHT);
        assert_eq!(ys.fold(f32::MIN, f32::max), HALF_HEIGHT);
    }

    #[test]
    fn test_random_colors_are_opaque_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = random_colors(&mut rng);
        assert_eq!(colors.len(), RECTANGLE_POSITIONS.len());
        for color in colors {
            for channel in &color[..3] {
                assert!((0.0..1.0).contains(channel));
            }
            assert_eq!(color[3], 1.0);
        }
    }

    #[test]
    fn test_random_colors_reproducible_with_seed() {
        let a = random_colors(&mut StdRng::seed_from_u64(42));
        let b = random_colors(&mut StdRng::seed_from_u64(42));
        let c = random_colors(&mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_buffers_are_tightly_packed() {
        assert_eq!(std::mem::size_of_val(&RECTANGLE_POSITIONS), VERTEX_COUNT * 2 * 4);
        assert_eq!(std::mem::size_of::<VertexColors>(), VERTEX_COUNT * 4 * 4);
    }
}
