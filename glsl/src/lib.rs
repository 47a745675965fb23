//! String based sampler objects emitting GLSL fragment shader source
//!
//! A [`Sampler`] answers "what color is this point" as GLSL text rather
//! than as a computation: it contributes uniform declarations, helper
//! functions and a main function body, and [`assemble`] stitches a tree of
//! samplers into one complete fragment shader. Compiling and linking the
//! result belongs to the GL object layer, not to this crate.

pub mod compose;
pub mod sampler;

pub use compose::*;
pub use sampler::*;
