//! The sampler trait and the built in samplers

use math::{Vec2, Vec4};

/// A named object contributing GLSL source fragments to a fragment shader
///
/// The [`assemble`](crate::assemble) step walks a tree of samplers, gives
/// every node a numeric id and concatenates the fragments into one
/// translation unit. Within any fragment the placeholder `{id}` stands for
/// the sampler's own id and `{id0}`, `{id1}`, ... for the ids of its
/// [`sub_samplers`](Sampler::sub_samplers) in order, so helper and uniform
/// names stay unique even when one sampler type appears several times.
pub trait Sampler {
    /// Identifier safe name, used for diagnostics
    fn name(&self) -> &str;

    /// Uniform declarations this sampler needs, or empty
    fn uniforms(&self) -> &str {
        ""
    }

    /// Free helper functions, or empty
    fn other_functions(&self) -> &str {
        ""
    }

    /// The sampler function suffix
    ///
    /// Must start with the literal parameter list `(vec3 uv, float time)`
    /// followed by the function body; the assembler prepends
    /// `vec4 sampler_{id}` to it.
    fn main(&self) -> &str;

    /// Child samplers this one composes over
    fn sub_samplers(&self) -> &[&dyn Sampler] {
        &[]
    }
}

fn glsl_vec4(c: Vec4<f32>) -> String {
    format!("vec4({:?}, {:?}, {:?}, {:?})", c.x, c.y, c.z, c.w)
}

/// Grayscale ramp over `uv.y`, handy for checking that a surface renders
/// at all
pub struct TestSampler;

impl Sampler for TestSampler {
    fn name(&self) -> &str {
        "test_sampler"
    }

    fn other_functions(&self) -> &str {
        "vec4 other_function(float t) {\n    return vec4(t);\n}\n"
    }

    fn main(&self) -> &str {
        "(vec3 uv, float time) {\n    return vec4(uv.y, uv.y, uv.y, 1.0);\n}\n"
    }
}

/// A single color everywhere
#[derive(Debug)]
pub struct FlatColor {
    main_src: String,
}

impl FlatColor {
    pub fn new(color: Vec4<f32>) -> Self {
        Self {
            main_src: format!(
                "(vec3 uv, float time) {{\n    return {};\n}}\n",
                glsl_vec4(color)
            ),
        }
    }
}

impl Sampler for FlatColor {
    fn name(&self) -> &str {
        "flat_color"
    }

    fn main(&self) -> &str {
        &self.main_src
    }
}

/// Two colors blended along an axis in uv space
#[derive(Debug)]
pub struct AxialGradient {
    helpers_src: String,
}

impl AxialGradient {
    pub fn new(from: Vec4<f32>, to: Vec4<f32>, axis: Vec2<f32>) -> Self {
        Self {
            helpers_src: format!(
                "vec4 axial_{{id}}(vec2 p) {{\n    \
                 float t = clamp(dot(p, vec2({:?}, {:?})), 0.0, 1.0);\n    \
                 return mix({}, {}, t);\n}}\n",
                axis.x,
                axis.y,
                glsl_vec4(from),
                glsl_vec4(to)
            ),
        }
    }
}

impl Sampler for AxialGradient {
    fn name(&self) -> &str {
        "axial_gradient"
    }

    fn other_functions(&self) -> &str {
        &self.helpers_src
    }

    fn main(&self) -> &str {
        "(vec3 uv, float time) {\n    return axial_{id}(uv.xy);\n}\n"
    }
}

/// Alternating cells of two colors
#[derive(Debug)]
pub struct CheckerBoard {
    main_src: String,
}

impl CheckerBoard {
    /// `cells` is the number of cells along each axis of uv space
    pub fn new(a: Vec4<f32>, b: Vec4<f32>, cells: Vec2<f32>) -> Self {
        Self {
            main_src: format!(
                "(vec3 uv, float time) {{\n    \
                 vec2 cell = floor(vec2(uv.x * {:?}, uv.y * {:?}));\n    \
                 float side = mod(cell.x + cell.y, 2.0);\n    \
                 return mix({}, {}, side);\n}}\n",
                cells.x,
                cells.y,
                glsl_vec4(a),
                glsl_vec4(b)
            ),
        }
    }
}

impl Sampler for CheckerBoard {
    fn name(&self) -> &str {
        "checker_board"
    }

    fn main(&self) -> &str {
        &self.main_src
    }
}

/// Multiplies the output of another sampler with a constant color
pub struct Tint<'a> {
    children: [&'a dyn Sampler; 1],
    main_src: String,
}

impl<'a> Tint<'a> {
    pub fn new(inner: &'a dyn Sampler, color: Vec4<f32>) -> Self {
        Self {
            children: [inner],
            main_src: format!(
                "(vec3 uv, float time) {{\n    \
                 return sampler_{{id0}}(uv, time) * {};\n}}\n",
                glsl_vec4(color)
            ),
        }
    }
}

impl Sampler for Tint<'_> {
    fn name(&self) -> &str {
        "tint"
    }

    fn main(&self) -> &str {
        &self.main_src
    }

    fn sub_samplers(&self) -> &[&dyn Sampler] {
        &self.children
    }
}
