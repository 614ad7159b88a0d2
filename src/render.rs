use crate::constants::*;
use aura_core::decor::{torus_mesh, ParticleField, RingField};
use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    light: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct RingInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SparkleInstance {
    centre_size: [f32; 4],
    color: [f32; 4],
}

struct RingMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,

    ring_pipeline: wgpu::RenderPipeline,
    ring_meshes: Vec<RingMesh>,
    ring_instances: wgpu::Buffer,

    sparkle_pipeline: wgpu::RenderPipeline,
    sparkle_instances: wgpu::Buffer,
    sparkle_capacity: usize,

    width: u32,
    height: u32,
    cam_eye: Vec3,
}

fn instance_attrs<const N: usize>(
    start: u32,
    formats: [wgpu::VertexFormat; N],
) -> Vec<wgpu::VertexAttribute> {
    let mut offset = 0;
    formats
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let a = wgpu::VertexAttribute {
                format: *f,
                offset,
                shader_location: start + i as u32,
            };
            offset += f.size();
            a
        })
        .collect()
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        rings: &RingField,
        sparkle_capacity: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("decor_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // the canvas sits over page content, so it has to be see-through
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rings_shader"),
            source: wgpu::ShaderSource::Wgsl(aura_core::RINGS_WGSL.into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("decor_globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("decor_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("decor_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("decor_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let blend = Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING);
        let vertex_attrs = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        let ring_instance_attrs = instance_attrs(
            2,
            [
                wgpu::VertexFormat::Float32x4,
                wgpu::VertexFormat::Float32x4,
                wgpu::VertexFormat::Float32x4,
                wgpu::VertexFormat::Float32x4,
                wgpu::VertexFormat::Float32x4,
            ],
        );
        let ring_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ring_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_ring"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<aura_core::TorusVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &vertex_attrs,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<RingInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &ring_instance_attrs,
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_ring"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let sparkle_attrs = wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];
        let sparkle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sparkle_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_sparkle"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<SparkleInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &sparkle_attrs,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_sparkle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent::OVER,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let ring_meshes = rings
            .specs()
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let mesh = torus_mesh(
                    spec.radius,
                    spec.tube,
                    TORUS_RADIAL_SEGMENTS,
                    TORUS_TUBULAR_SEGMENTS,
                );
                RingMesh {
                    vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("ring_vb_{i}")),
                        contents: bytemuck::cast_slice(&mesh.vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                    indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("ring_ib_{i}")),
                        contents: bytemuck::cast_slice(&mesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    }),
                    index_count: mesh.indices.len() as u32,
                }
            })
            .collect();
        let ring_instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ring_instances"),
            size: (std::mem::size_of::<RingInstance>() * rings.specs().len().max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sparkle_capacity = sparkle_capacity.max(1);
        let sparkle_instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sparkle_instances"),
            size: (std::mem::size_of::<SparkleInstance>() * sparkle_capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bg,
            ring_pipeline,
            ring_meshes,
            ring_instances,
            sparkle_pipeline,
            sparkle_instances,
            sparkle_capacity,
            width,
            height,
            cam_eye: Vec3::new(0.0, 0.0, CAMERA_Z),
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn globals(&self, elapsed: f32, emissive: f32) -> Globals {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let proj = Mat4::perspective_rh(
            CAMERA_FOV_Y_DEG.to_radians(),
            aspect,
            CAMERA_NEAR,
            CAMERA_FAR,
        );
        let view = Mat4::look_at_rh(self.cam_eye, Vec3::ZERO, Vec3::Y);
        // camera basis in world space, for billboards
        let inv = view.inverse();
        let right = inv.x_axis.truncate();
        let up = inv.y_axis.truncate();
        Globals {
            view_proj: (proj * view).to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(elapsed).to_array(),
            light: [-0.4, -0.6, -1.0, emissive],
        }
    }

    pub fn render(
        &mut self,
        rings: &RingField,
        sparkles: &ParticleField,
    ) -> Result<(), wgpu::SurfaceError> {
        let globals = self.globals(rings.elapsed(), rings.emissive());
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let ring_data: Vec<RingInstance> = rings
            .specs()
            .iter()
            .enumerate()
            .filter_map(|(i, spec)| {
                let model = rings.model_matrix(i)?;
                Some(RingInstance {
                    model: model.to_cols_array_2d(),
                    color: spec.color.with_alpha(RING_ALPHA).to_array(),
                })
            })
            .collect();
        self.queue
            .write_buffer(&self.ring_instances, 0, bytemuck::cast_slice(&ring_data));

        let sparkle_data: Vec<SparkleInstance> = sparkles
            .sparkles()
            .iter()
            .take(self.sparkle_capacity)
            .map(|s| {
                let [r, g, b] = SPARKLE_COLOR;
                SparkleInstance {
                    centre_size: s.position().extend(s.size).to_array(),
                    color: [r, g, b, s.brightness],
                }
            })
            .collect();
        self.queue.write_buffer(
            &self.sparkle_instances,
            0,
            bytemuck::cast_slice(&sparkle_data),
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("decor_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("decor_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bg, &[]);

            rpass.set_pipeline(&self.ring_pipeline);
            rpass.set_vertex_buffer(1, self.ring_instances.slice(..));
            for (i, mesh) in self.ring_meshes.iter().enumerate().take(ring_data.len()) {
                let i = i as u32;
                rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, i..i + 1);
            }

            if !sparkle_data.is_empty() {
                rpass.set_pipeline(&self.sparkle_pipeline);
                rpass.set_vertex_buffer(0, self.sparkle_instances.slice(..));
                rpass.draw(0..6, 0..sparkle_data.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
