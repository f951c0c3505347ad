use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Document, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject, Window,
};

use super::schedule::FrameLoop;
use super::{controls, input, js_err};
use crate::config::SceneConfig;
use crate::error::{Error, Result};
use crate::frame::{Renderer, Uniform};
use crate::session::Session;
use crate::shaders;
use crate::signal::CanvasSize;

/// Triangle strip covering clip space.
const QUAD: [f32; 8] = [1.0, 1.0, -1.0, 1.0, 1.0, -1.0, -1.0, -1.0];

/// WebGL2 program for the full-screen quad, compiled once.
pub struct GlRenderer {
    gl: GL,
    locations: Vec<Option<WebGlUniformLocation>>,
    _program: WebGlProgram,
    _quad: WebGlBuffer,
    _vao: WebGlVertexArrayObject,
}

impl GlRenderer {
    pub fn new(canvas: &HtmlCanvasElement, fragment_source: &str) -> Result<Self> {
        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(js_err)?
            .ok_or(Error::Unsupported("WebGL2"))?
            .dyn_into()
            .map_err(|_| Error::Unsupported("WebGL2"))?;

        let vertex = compile(&gl, GL::VERTEX_SHADER, "vertex", shaders::VERTEX_SOURCE)?;
        let fragment = compile(&gl, GL::FRAGMENT_SHADER, "fragment", fragment_source)?;
        let program = link(&gl, &vertex, &fragment)?;
        gl.use_program(Some(&program));

        // Uniforms the driver optimised away come back as `None`, which the
        // uniform setters accept.
        let locations = Uniform::ALL
            .iter()
            .map(|u| gl.get_uniform_location(&program, u.name()))
            .collect();

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| Error::Js("failed to create vertex array".into()))?;
        gl.bind_vertex_array(Some(&vao));
        let quad = gl
            .create_buffer()
            .ok_or_else(|| Error::Js("failed to create vertex buffer".into()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&quad));
        let vertices = js_sys::Float32Array::from(&QUAD[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);
        gl.vertex_attrib_pointer_with_i32(0, 2, GL::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(0);

        Ok(Self {
            gl,
            locations,
            _program: program,
            _quad: quad,
            _vao: vao,
        })
    }

    pub fn set_viewport(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn location(&self, uniform: Uniform) -> Option<&WebGlUniformLocation> {
        self.locations.get(uniform as usize).and_then(Option::as_ref)
    }
}

impl Renderer for GlRenderer {
    fn set_float(&mut self, uniform: Uniform, value: f32) {
        self.gl.uniform1f(self.location(uniform), value);
    }

    fn set_vec2(&mut self, uniform: Uniform, value: [f32; 2]) {
        self.gl.uniform2f(self.location(uniform), value[0], value[1]);
    }

    fn draw(&mut self) {
        self.gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
    }
}

fn compile(gl: &GL, kind: u32, stage: &'static str, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| Error::Js(format!("failed to create {stage} shader")))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(Error::ShaderCompile { stage, log })
    }
}

fn link(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| Error::Js("failed to create program".into()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(Error::ProgramLink(log))
    }
}

fn canvas_size(canvas: &HtmlCanvasElement) -> CanvasSize {
    CanvasSize::new(f64::from(canvas.width()), f64::from(canvas.height()))
}

/// Sizes the canvas backing store to the window's inner size.
fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement) -> Result<()> {
    let w = window.inner_width().map_err(js_err)?.as_f64().unwrap_or(300.0);
    let h = window.inner_height().map_err(js_err)?.as_f64().unwrap_or(150.0);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    Ok(())
}

/// Wires renderer, session, input and controls together and starts the
/// render loop.
pub fn start(
    window: &Window,
    document: &Document,
    canvas: HtmlCanvasElement,
    config: SceneConfig,
) -> Result<()> {
    fit_to_window(window, &canvas)?;
    let renderer = GlRenderer::new(&canvas, &shaders::fragment_source(&config))?;
    renderer.set_viewport(canvas.width(), canvas.height());
    let renderer = Rc::new(RefCell::new(renderer));
    let session = Rc::new(RefCell::new(Session::new(&config, canvas_size(&canvas))));

    // Resize canvas to fit window
    let resize_closure = {
        let window = window.clone();
        let canvas = canvas.clone();
        let renderer = renderer.clone();
        Closure::wrap(Box::new(move || {
            if let Err(err) = fit_to_window(&window, &canvas) {
                log::warn!("resize failed: {err}");
                return;
            }
            renderer
                .borrow()
                .set_viewport(canvas.width(), canvas.height());
        }) as Box<dyn FnMut()>)
    };
    window
        .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    resize_closure.forget();

    input::attach(window, &canvas, session.clone())?;
    if config.controls {
        controls::build(window, document, session.clone())?;
    }

    let performance = window
        .performance()
        .ok_or(Error::Unsupported("performance.now()"))?;
    // Runs for the lifetime of the page.
    FrameLoop::start(move || {
        let size = canvas_size(&canvas);
        session
            .borrow_mut()
            .tick(performance.now(), size, &mut *renderer.borrow_mut());
    })?;

    log::info!("render loop started");
    Ok(())
}
