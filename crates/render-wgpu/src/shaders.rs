//! Built-in WGSL sources. Both shaders share one vertex/instance layout so a
//! single instance buffer feeds either pipeline.

use cubewalk_assets::ShaderSource;
use std::path::Path;

/// Texture times vertex color times instance tint.
pub const UNLIT_SHADER: &str = r#"
@group(1) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(1) @binding(1)
var s_diffuse: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) uv: vec2<f32>,
    @location(3) normal: vec3<f32>,
};

struct InstanceInput {
    @location(4) mvp_0: vec4<f32>,
    @location(5) mvp_1: vec4<f32>,
    @location(6) mvp_2: vec4<f32>,
    @location(7) mvp_3: vec4<f32>,
    @location(8) model_0: vec4<f32>,
    @location(9) model_1: vec4<f32>,
    @location(10) model_2: vec4<f32>,
    @location(11) model_3: vec4<f32>,
    @location(12) tint: vec4<f32>,
    @location(13) normal_0: vec4<f32>,
    @location(14) normal_1: vec4<f32>,
    @location(15) normal_2: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let mvp = mat4x4<f32>(
        instance.mvp_0,
        instance.mvp_1,
        instance.mvp_2,
        instance.mvp_3,
    );

    var out: VertexOutput;
    out.clip_position = mvp * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color * instance.tint;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(t_diffuse, s_diffuse, in.uv) * in.color;
}
"#;

/// Phong: ambient, diffuse, and a specular term only on faces that see the light.
pub const LIT_SHADER: &str = r#"
struct Frame {
    view_pos: vec4<f32>,
    light_pos: vec4<f32>,
    light_color: vec4<f32>,
    // x: ambient, y: specular strength, z: shininess
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

@group(1) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(1) @binding(1)
var s_diffuse: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) uv: vec2<f32>,
    @location(3) normal: vec3<f32>,
};

struct InstanceInput {
    @location(4) mvp_0: vec4<f32>,
    @location(5) mvp_1: vec4<f32>,
    @location(6) mvp_2: vec4<f32>,
    @location(7) mvp_3: vec4<f32>,
    @location(8) model_0: vec4<f32>,
    @location(9) model_1: vec4<f32>,
    @location(10) model_2: vec4<f32>,
    @location(11) model_3: vec4<f32>,
    @location(12) tint: vec4<f32>,
    @location(13) normal_0: vec4<f32>,
    @location(14) normal_1: vec4<f32>,
    @location(15) normal_2: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let mvp = mat4x4<f32>(
        instance.mvp_0,
        instance.mvp_1,
        instance.mvp_2,
        instance.mvp_3,
    );
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );

    var out: VertexOutput;
    out.clip_position = mvp * vec4<f32>(vertex.position, 1.0);
    out.world_pos = (model * vec4<f32>(vertex.position, 1.0)).xyz;
    let normal_matrix = mat3x3<f32>(
        instance.normal_0.xyz,
        instance.normal_1.xyz,
        instance.normal_2.xyz,
    );
    out.world_normal = normal_matrix * vertex.normal;
    out.color = vertex.color * instance.tint;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(t_diffuse, s_diffuse, in.uv) * in.color;
    let n = normalize(in.world_normal);
    let to_light = normalize(frame.light_pos.xyz - in.world_pos);
    let light = frame.light_color.rgb;

    let ambient = frame.params.x * light;
    let diff = max(dot(n, to_light), 0.0);
    let diffuse = diff * light;

    var specular = vec3<f32>(0.0);
    if diff > 0.0 {
        let to_view = normalize(frame.view_pos.xyz - in.world_pos);
        let reflected = reflect(-to_light, n);
        specular = pow(max(dot(to_view, reflected), 0.0), frame.params.z) * frame.params.y * light;
    }

    return vec4<f32>((ambient + diffuse + specular) * base.rgb, base.a);
}
"#;

pub const UNLIT_FILE: &str = "unlit.wgsl";
pub const LIT_FILE: &str = "lit.wgsl";

/// Shader sources for both pipelines.
#[derive(Debug, Clone)]
pub struct ShaderSet {
    pub unlit: ShaderSource,
    pub lit: ShaderSource,
}

impl Default for ShaderSet {
    fn default() -> Self {
        Self {
            unlit: ShaderSource::embedded(UNLIT_FILE, UNLIT_SHADER),
            lit: ShaderSource::embedded(LIT_FILE, LIT_SHADER),
        }
    }
}

impl ShaderSet {
    /// Built-in shaders, each replaced by `dir/<name>.wgsl` when that file reads.
    pub fn load(dir: Option<&Path>) -> Self {
        Self {
            unlit: ShaderSource::load_or_embedded(dir, UNLIT_FILE, UNLIT_SHADER),
            lit: ShaderSource::load_or_embedded(dir, LIT_FILE, LIT_SHADER),
        }
    }
}
