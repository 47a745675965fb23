use math::{Vec2, Vec4};

fn main() {
    env_logger::init();

    let checker = glsl::CheckerBoard::new(
        Vec4::new(0.1, 0.1, 0.1, 1.0),
        Vec4::new(0.9, 0.9, 0.9, 1.0),
        Vec2::new(8.0, 8.0),
    );
    let tint = glsl::Tint::new(&checker, Vec4::new(1.0, 0.8, 0.6, 1.0));

    let src = glsl::assemble(&tint).expect("Failed to assemble shader");
    println!("{}", src);
}
