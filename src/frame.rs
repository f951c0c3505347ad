//! Per-frame uniform values and the renderer seam they are pushed through.

/// The fixed uniform set of the fragment program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    CanvasSize,
    Time,
    Mouse,
    Red,
    Green,
    Blue,
}

impl Uniform {
    pub const ALL: [Uniform; 6] = [
        Uniform::CanvasSize,
        Uniform::Time,
        Uniform::Mouse,
        Uniform::Red,
        Uniform::Green,
        Uniform::Blue,
    ];

    /// Name of the uniform in the GLSL source.
    pub fn name(self) -> &'static str {
        match self {
            Uniform::CanvasSize => "canvasSize",
            Uniform::Time => "time",
            Uniform::Mouse => "mouse",
            Uniform::Red => "r",
            Uniform::Green => "g",
            Uniform::Blue => "b",
        }
    }
}

/// Something that owns a compiled program and can draw the full-screen quad.
pub trait Renderer {
    fn set_float(&mut self, uniform: Uniform, value: f32);
    fn set_vec2(&mut self, uniform: Uniform, value: [f32; 2]);
    fn draw(&mut self);
}

/// Everything one frame pushes before its draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub canvas_size: [f32; 2],
    /// Seconds since page load.
    pub time: f32,
    pub mouse: [f32; 2],
    /// `(channel / 10)^2` for r, g, b.
    pub coefficients: [f32; 3],
}

impl FrameUniforms {
    /// Pushes every uniform, then issues the draw call.
    pub fn submit<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.set_vec2(Uniform::CanvasSize, self.canvas_size);
        renderer.set_float(Uniform::Time, self.time);
        renderer.set_vec2(Uniform::Mouse, self.mouse);
        renderer.set_float(Uniform::Red, self.coefficients[0]);
        renderer.set_float(Uniform::Green, self.coefficients[1]);
        renderer.set_float(Uniform::Blue, self.coefficients[2]);
        renderer.draw();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Float(Uniform, f32),
        Vec2(Uniform, [f32; 2]),
        Draw,
    }

    /// Records every call for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        pub calls: Vec<Call>,
    }

    impl RecordingRenderer {
        pub fn draws(&self) -> usize {
            self.calls.iter().filter(|c| **c == Call::Draw).count()
        }

        pub fn last_vec2(&self, uniform: Uniform) -> Option<[f32; 2]> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::Vec2(u, v) if *u == uniform => Some(*v),
                _ => None,
            })
        }

        pub fn last_float(&self, uniform: Uniform) -> Option<f32> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::Float(u, v) if *u == uniform => Some(*v),
                _ => None,
            })
        }
    }

    impl Renderer for RecordingRenderer {
        fn set_float(&mut self, uniform: Uniform, value: f32) {
            self.calls.push(Call::Float(uniform, value));
        }

        fn set_vec2(&mut self, uniform: Uniform, value: [f32; 2]) {
            self.calls.push(Call::Vec2(uniform, value));
        }

        fn draw(&mut self) {
            self.calls.push(Call::Draw);
        }
    }
}
