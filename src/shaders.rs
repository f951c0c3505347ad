//! GLSL ES 3.00 sources for the full-screen quad.

use crate::config::{PaletteKind, Scene, SceneConfig};
use crate::julia::{COSINE_A, COSINE_B, COSINE_C, COSINE_D, ESCAPE_RADIUS, MAX_ITERATIONS};

pub const VERTEX_SOURCE: &str = r#"#version 300 es
layout(location = 0) in vec2 position;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

const HEADER: &str = r#"#version 300 es
precision highp float;

uniform vec2 canvasSize;
uniform float time;
uniform vec2 mouse;
uniform float r;
uniform float g;
uniform float b;

out vec4 fragColor;
"#;

fn vec3_literal(v: [f64; 3]) -> String {
    format!("vec3({:?}, {:?}, {:?})", v[0], v[1], v[2])
}

fn cosine_palette() -> String {
    format!(
        r#"
vec3 palette(float t) {{
    vec3 pa = {a};
    vec3 pb = {b};
    vec3 pc = {c};
    vec3 pd = {d};
    return pa + pb * cos(6.28318 * (pc * t + pd));
}}
"#,
        a = vec3_literal(COSINE_A),
        b = vec3_literal(COSINE_B),
        c = vec3_literal(COSINE_C),
        d = vec3_literal(COSINE_D),
    )
}

const TUNABLE_PALETTE: &str = r#"
vec3 palette(float t) {
    return vec3(sin(t * r), sin(t * g), sin(t * b));
}
"#;

fn julia_body(scale: f32) -> String {
    format!(
        r#"
void main() {{
    vec2 uv = gl_FragCoord.xy / canvasSize * 2.0 - 1.0;
    uv.x *= canvasSize.x / canvasSize.y;

    vec2 c = (mouse / canvasSize * 2.0 - 1.0) * 1.5;
    vec2 z = uv;

    float count = 0.0;
    for (int i = 0; i < {iterations}; i++) {{
        z = vec2(z.x * z.x - z.y * z.y, 2.0 * z.x * z.y) + c;
        if (length(z) > {radius:?}) break;
        count += 1.0;
    }}

    float t = count / {iterations}.0;
    if (length(z) > {radius:?}) {{
        t -= (length(z) - {radius:?}) / 200.0;
    }}
    fragColor = vec4(palette(t * {scale:?}), 1.0);
}}
"#,
        iterations = MAX_ITERATIONS,
        radius = ESCAPE_RADIUS,
        scale = scale,
    )
}

const SHADER_ART_BODY: &str = r#"
void main() {
    vec2 uv = gl_FragCoord.xy / canvasSize * 2.0 - 1.0;
    uv.x *= canvasSize.x / canvasSize.y;
    vec2 uv0 = uv;
    vec3 color = vec3(0.0);

    for (float i = 0.0; i < 4.0; i++) {
        uv = fract(uv * 1.6) - 0.5;

        float d = length(uv) * exp(-length(uv0) * 0.8);
        vec3 col = palette(length(uv0) + time / 4.0 + i / 4.0);

        d = abs(sin(d * 10.0 + time) / 10.0);
        d = pow(0.01 / d, 1.2);

        color += col * d;
    }

    fragColor = vec4(color, 1.0);
}
"#;

/// Fragment program for the configured scene and palette.
pub fn fragment_source(config: &SceneConfig) -> String {
    let palette = match config.palette {
        PaletteKind::Cosine => cosine_palette(),
        PaletteKind::Tunable | PaletteKind::Cycling => TUNABLE_PALETTE.to_string(),
    };
    let body = match config.scene {
        Scene::Julia => julia_body(config.palette_scale),
        Scene::ShaderArt => SHADER_ART_BODY.to_string(),
    };
    format!("{HEADER}{palette}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julia_source_embeds_constants() {
        let source = fragment_source(&SceneConfig::julia());
        assert!(source.starts_with("#version 300 es"));
        assert!(source.contains("vec3(0.263, 0.416, 0.557)"));
        assert!(source.contains("i < 100;"));
        assert!(source.contains("count / 100.0"));
        assert!(source.contains("palette(t * 1.1)"));
        assert!(source.contains("length(z) > 2.0"));
    }

    #[test]
    fn tunable_palette_reads_channel_uniforms() {
        let source = fragment_source(&SceneConfig::tunable());
        assert!(source.contains("sin(t * r)"));
        assert!(!source.contains("6.28318"));
        assert!(source.contains("palette(t * 0.95)"));
    }

    #[test]
    fn shader_art_has_no_escape_loop() {
        let source = fragment_source(&SceneConfig::shader_art());
        assert!(source.contains("fract(uv * 1.6)"));
        assert!(!source.contains("length(z)"));
        assert_eq!(source.matches("void main()").count(), 1);
    }
}
