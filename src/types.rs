use glam::Mat3;

/// Matrix uniform buffer data for GPU
///
/// WGSL lays out `mat3x3<f32>` as three `vec3` columns, each aligned to 16
/// bytes, so every column carries one float of padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MatrixUniform {
    pub columns: [[f32; 4]; 3],
}

impl MatrixUniform {
    pub fn new(matrix: &Mat3) -> Self {
        let [c0, c1, c2] = matrix.to_cols_array_2d();
        Self {
            columns: [
                [c0[0], c0[1], c0[2], 0.0],
                [c1[0], c1[1], c1[2], 0.0],
                [c2[0], c2[1], c2[2], 0.0],
            ],
        }
    }

    pub fn size() -> wgpu::BufferAddress {
        std::mem::size_of::<Self>() as wgpu::BufferAddress
    }
}

impl From<Mat3> for MatrixUniform {
    fn from(matrix: Mat3) -> Self {
        Self::new(&matrix)
    }
}
