//! Assembling a sampler tree into one fragment shader

use dyna::DynArray;

use crate::sampler::Sampler;

/// An error while assembling a sampler tree
#[derive(Debug)]
pub enum AssembleError {
    /// A sampler main fragment did not start with the expected parameter
    /// list
    MalformedMain { sampler: String },
    /// The same sampler instance appeared twice in the tree, which would
    /// emit two conflicting definitions of its function
    DuplicateSampler { sampler: String },
}

impl std::fmt::Display for AssembleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedMain { sampler } => {
                write!(
                    f,
                    "main of sampler {} must start with (vec3 uv, float time)",
                    sampler
                )
            }
            Self::DuplicateSampler { sampler } => {
                write!(f, "sampler {} appears more than once in the tree", sampler)
            }
        }
    }
}

impl std::error::Error for AssembleError {}

struct Node<'a> {
    id: usize,
    sampler: &'a dyn Sampler,
    child_ids: DynArray<usize>,
}

/// Assign ids in pre order, collect nodes in post order so every child is
/// emitted before the parent that calls it
fn visit<'a>(
    sampler: &'a dyn Sampler,
    seen: &mut DynArray<*const ()>,
    nodes: &mut DynArray<Node<'a>>,
    next_id: &mut usize,
) -> Result<usize, AssembleError> {
    let addr = sampler as *const dyn Sampler as *const ();
    if seen.iter().any(|&p| p == addr) {
        return Err(AssembleError::DuplicateSampler {
            sampler: sampler.name().to_string(),
        });
    }
    seen.push(addr);

    let id = *next_id;
    *next_id += 1;

    let mut child_ids = DynArray::new();
    for &child in sampler.sub_samplers() {
        child_ids.push(visit(child, seen, nodes, next_id)?);
    }
    nodes.push(Node {
        id,
        sampler,
        child_ids,
    });
    Ok(id)
}

/// Fill in the `{id}` and `{idN}` placeholders of one source fragment
fn substitute(src: &str, id: usize, child_ids: &[usize]) -> String {
    let mut out = src.replace("{id}", &id.to_string());
    for (i, child) in child_ids.iter().enumerate() {
        out = out.replace(&format!("{{id{}}}", i), &child.to_string());
    }
    out
}

/// Stitch a sampler tree into a complete fragment shader
///
/// The root sampler gets id 0 and its output becomes the fragment color;
/// uv coordinates arrive as an interpolated input and the elapsed time as a
/// uniform. The returned source is a full translation unit ready to hand to
/// a shader compiler.
pub fn assemble(root: &dyn Sampler) -> Result<String, AssembleError> {
    let mut seen: DynArray<*const ()> = DynArray::new();
    let mut nodes: DynArray<Node> = DynArray::new();
    let mut next_id = 0;
    visit(root, &mut seen, &mut nodes, &mut next_id)?;

    // reject bad fragments before emitting anything
    for node in nodes.iter() {
        if !node.sampler.main().trim_start().starts_with('(') {
            return Err(AssembleError::MalformedMain {
                sampler: node.sampler.name().to_string(),
            });
        }
    }

    let mut src = String::new();
    src.push_str("#version 330 core\n\n");
    src.push_str("in vec3 uv;\n");
    src.push_str("uniform float time;\n");
    src.push_str("out vec4 frag_color;\n");

    for node in nodes.iter() {
        let uniforms = node.sampler.uniforms();
        if !uniforms.is_empty() {
            src.push('\n');
            src.push_str(&substitute(uniforms, node.id, &node.child_ids));
        }
    }

    for node in nodes.iter() {
        let helpers = node.sampler.other_functions();
        if !helpers.is_empty() {
            src.push('\n');
            src.push_str(&substitute(helpers, node.id, &node.child_ids));
        }
        src.push('\n');
        src.push_str(&format!("vec4 sampler_{}", node.id));
        src.push_str(&substitute(node.sampler.main(), node.id, &node.child_ids));
    }

    src.push_str("\nvoid main() {\n    frag_color = sampler_0(uv, time);\n}\n");

    #[cfg(feature = "logging")]
    log::trace!(
        "GLSL: assembled shader for {}, {} samplers, {} bytes",
        root.name(),
        nodes.len(),
        src.len()
    );

    Ok(src)
}
