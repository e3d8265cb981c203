use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use wgpu::{BindGroup, BindGroupLayout, Device, RenderPipeline, Sampler, SurfaceConfiguration, Texture};
use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

use super::display_manager::DisplayMode;
use super::gpu_context::GpuContext;
use super::surface::Surface;
use crate::traits::DisplayBackend;

/// Presents real surfaces to a winit window through wgpu
///
/// Each frame the CPU-composited real surface is uploaded into a texture
/// of the same size and drawn 1:1 with a fullscreen triangle.
pub struct WgpuBackend {
    window: Arc<Window>,
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: SurfaceConfiguration,
    render_pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
    sampler: Sampler,
    texture: Texture,
    bind_group: BindGroup,
    width: u32,
    height: u32,
}

impl WgpuBackend {
    /// Create a backend presenting to `window`
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create window surface")?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let surface_caps = surface.get_capabilities(gpu.adapter());
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("Surface reports no supported formats")?;

        let surface_config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        if size.width > 0 && size.height > 0 {
            surface.configure(gpu.device(), &surface_config);
        }

        let bind_group_layout = Self::create_bind_group_layout(gpu.device());
        let render_pipeline = Self::create_render_pipeline(gpu.device(), &bind_group_layout, surface_format);
        let sampler = gpu.device().create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Frame Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let texture = Self::create_frame_texture(gpu.device(), size.width, size.height);
        let bind_group = Self::create_bind_group(gpu.device(), &bind_group_layout, &texture, &sampler);

        Ok(Self {
            window,
            gpu,
            surface,
            surface_config,
            render_pipeline,
            bind_group_layout,
            sampler,
            texture,
            bind_group,
            width: size.width,
            height: size.height,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Current surface dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reconfigure the swapchain and frame texture for a new size
    fn configure(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if width == 0 || height == 0 {
            // Minimised; keep the old swapchain until a real size arrives
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(self.gpu.device(), &self.surface_config);

        self.texture = Self::create_frame_texture(self.gpu.device(), width, height);
        self.bind_group = Self::create_bind_group(
            self.gpu.device(),
            &self.bind_group_layout,
            &self.texture,
            &self.sampler,
        );
    }

    fn create_frame_texture(device: &Device, width: u32, height: u32) -> Texture {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Frame Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        })
    }

    fn create_bind_group_layout(device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
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
        })
    }

    fn create_bind_group(device: &Device, layout: &BindGroupLayout, texture: &Texture, sampler: &Sampler) -> BindGroup {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn create_render_pipeline(
        device: &Device,
        bind_group_layout: &BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Present Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("present.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Present Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Present Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}

impl DisplayBackend for WgpuBackend {
    fn request_surface(&mut self, mode: DisplayMode, width: u32, height: u32) -> Result<(u32, u32)> {
        let max = self.gpu.max_texture_dimension();
        if width > max || height > max {
            bail!("{}x{} exceeds the device texture limit of {}", width, height, max);
        }

        let granted = match mode {
            DisplayMode::Fullscreen => {
                let monitor = self.window.current_monitor();
                self.window.set_fullscreen(Some(Fullscreen::Borderless(monitor)));
                (width, height)
            }
            DisplayMode::Windowed => {
                if self.window.fullscreen().is_some() {
                    self.window.set_fullscreen(None);
                }
                let requested = PhysicalSize::new(width, height);
                if self.window.inner_size() == requested {
                    (width, height)
                } else {
                    // `Some` means the platform applied the size synchronously
                    match self.window.request_inner_size(requested) {
                        Some(size) => (size.width, size.height),
                        None => (width, height),
                    }
                }
            }
        };

        debug!("Configuring {}x{} for {:?}", granted.0, granted.1, mode);
        self.configure(granted.0, granted.1);
        Ok(granted)
    }

    fn display_size(&self) -> Option<(u32, u32)> {
        self.window
            .current_monitor()
            .or_else(|| self.window.primary_monitor())
            .map(|monitor| monitor.size())
            .filter(|size| size.width > 0 && size.height > 0)
            .map(|size| (size.width, size.height))
    }

    fn present(&mut self, frame: &Surface) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        if frame.dimensions() != (self.width, self.height) {
            bail!(
                "Frame {}x{} doesn't match surface {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            );
        }

        self.gpu.queue().write_texture(
            self.texture.as_image_copy(),
            frame.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(self.gpu.device(), &self.surface_config);
                bail!("Surface lost or outdated; reconfigured");
            }
            Err(e) => return Err(anyhow!("Failed to acquire frame: {}", e)),
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.gpu.queue().submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        surface_texture.present();

        Ok(())
    }
}
