use crate::shaders::ShaderSet;
use bytemuck::{Pod, Zeroable};
use cubewalk_assets::{FALLBACK_TEXTURE_CELLS, FALLBACK_TEXTURE_SIZE, TextureImage};
use cubewalk_scene::{FramePlan, FrameTransform, Lighting, Scene, Vertex, cube_mesh};
use glam::{Mat3, Mat4, Vec3};
use std::ops::Range;
use wgpu::util::DeviceExt;

/// Per-frame uniform block, read by the lit shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_pos: [f32; 4],
    pub light_pos: [f32; 4],
    pub light_color: [f32; 4],
    /// ambient, specular strength, shininess, unused
    pub params: [f32; 4],
}

impl FrameUniforms {
    pub fn new(eye: Vec3, lighting: Option<&Lighting>) -> Self {
        let light = lighting.copied().unwrap_or_default();
        Self {
            view_pos: eye.extend(1.0).to_array(),
            light_pos: light.position.extend(1.0).to_array(),
            light_color: light.color.extend(1.0).to_array(),
            params: [light.ambient, light.specular, light.shininess, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
    /// Inverse-transpose of the model's upper 3x3, columns padded to vec4.
    pub normal: [[f32; 4]; 3],
}

impl InstanceData {
    pub fn new(transform: &FrameTransform, tint: [f32; 4]) -> Self {
        let normal = normal_matrix(transform.model);
        Self {
            mvp: transform.mvp.to_cols_array_2d(),
            model: transform.model.to_cols_array_2d(),
            tint,
            normal: [
                normal.x_axis.extend(0.0).to_array(),
                normal.y_axis.extend(0.0).to_array(),
                normal.z_axis.extend(0.0).to_array(),
            ],
        }
    }
}

/// Matrix carrying object-space normals to world space under any scale.
/// A singular model keeps its own 3x3.
pub fn normal_matrix(model: Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(model);
    if linear.determinant().abs() <= f32::EPSILON {
        return linear;
    }
    linear.inverse().transpose()
}

/// One indexed draw: a face's index range for a single instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceDraw {
    pub indices: Range<u32>,
    pub instance: u32,
}

/// Draw list for `scene`, in instance order then face order.
pub fn face_draws(scene: &Scene) -> Vec<FaceDraw> {
    scene
        .instances
        .iter()
        .enumerate()
        .flat_map(|(i, instance)| {
            instance.faces.iter().map(move |face| FaceDraw {
                indices: face.index_range(),
                instance: i as u32,
            })
        })
        .collect()
}

/// wgpu renderer for [`FramePlan`]s.
pub struct WgpuRenderer {
    unlit_pipeline: wgpu::RenderPipeline,
    lit_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        scene: &Scene,
        texture: &TextureImage,
        shaders: &ShaderSet,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_uniforms"),
            contents: bytemuck::bytes_of(&FrameUniforms::new(Vec3::ZERO, scene.lighting.as_ref())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_uniform_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let max_dimension = device.limits().max_texture_dimension_2d;
        let fallback;
        let texture = if texture.fits(max_dimension) {
            texture
        } else {
            tracing::warn!(
                "texture {}x{} exceeds the device limit of {max_dimension}; using checkerboard",
                texture.width,
                texture.height
            );
            fallback = TextureImage::checkerboard(FALLBACK_TEXTURE_SIZE, FALLBACK_TEXTURE_CELLS);
            &fallback
        };
        let texture_view = Self::upload_texture(device, queue, texture);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("diffuse_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let unlit_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            surface_format,
            "unlit",
            &shaders.unlit.code,
        );
        let lit_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            surface_format,
            "lit",
            &shaders.lit.code,
        );

        let mesh = cube_mesh();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let max_instances = (scene.instances.len() as u32).max(1);
        let instance_buffer = Self::create_instance_buffer(device, max_instances);

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!(
            "renderer ready: {} instance slots, texture {}x{}, shaders {} / {}",
            max_instances,
            texture.width,
            texture.height,
            shaders.unlit.label,
            shaders.lit.label
        );

        Self {
            unlit_pipeline,
            lit_pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group,
            cube_vertex_buffer,
            cube_index_buffer,
            instance_buffer,
            max_instances,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame of `plan` into `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        plan: &FramePlan<'_>,
    ) {
        let scene = plan.scene;
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::new(plan.eye, scene.lighting.as_ref())),
        );

        let instances: Vec<InstanceData> = scene
            .instances
            .iter()
            .zip(&plan.transforms)
            .map(|(instance, transform)| InstanceData::new(transform, instance.tint))
            .collect();

        if instances.len() as u32 > self.max_instances {
            self.max_instances = instances.len() as u32;
            self.instance_buffer = Self::create_instance_buffer(device, self.max_instances);
            tracing::debug!("grew instance buffer to {} slots", self.max_instances);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let [r, g, b, a] = scene.clear_color;
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if !instances.is_empty() {
                let pipeline = if scene.is_lit() {
                    &self.lit_pipeline
                } else {
                    &self.unlit_pipeline
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_bind_group(1, &self.texture_bind_group, &[]);
                pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                for draw in face_draws(scene) {
                    pass.draw_indexed(draw.indices, 0, draw.instance..draw.instance + 1);
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
        label: &str,
        code: &str,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(code.into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Unorm8x4,
                            2 => Float32x2,
                            3 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                            8 => Float32x4,
                            9 => Float32x4,
                            10 => Float32x4,
                            11 => Float32x4,
                            12 => Float32x4,
                            13 => Float32x4,
                            14 => Float32x4,
                            15 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn upload_texture(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("diffuse_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(image.height),
            },
            size,
        );
        texture.create_view(&Default::default())
    }

    fn create_instance_buffer(device: &wgpu::Device, slots: u32) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: slots as u64 * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
