pub mod camera;
pub mod environment;
pub mod geometry;
pub mod lifecycle;
pub mod motion;
pub mod program;
pub mod sampler;
pub mod sphere;

pub use camera::*;
pub use environment::*;
pub use geometry::*;
pub use lifecycle::*;
pub use motion::*;
pub use program::*;
pub use sampler::*;
pub use sphere::*;

// Shaders bundled as string constants
pub static BACKDROP_WGSL: &str = include_str!("../../shaders/backdrop.wgsl");
pub static STANDARD_VS_WGSL: &str = include_str!("../../shaders/standard_vs.wgsl");
pub static STANDARD_FS_WGSL: &str = include_str!("../../shaders/standard_fs.wgsl");
pub static SPHERE_VS_WGSL: &str = include_str!("../../shaders/sphere_vs.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
