//! Texture abstractions
//!
//! Provides the 2D texture used for material slots and a file-backed loader.

use crate::context::WgpuContext;
use crate::error::{BinderError, Result};
use crate::material::textures::TextureLoader;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// A 2D texture with associated view and sampler.
pub struct Texture2D {
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) size: wgpu::Extent3d,
    pub(crate) format: wgpu::TextureFormat,
}

impl Texture2D {
    /// Create a new empty texture.
    pub fn new(
        ctx: &WgpuContext,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        usage: wgpu::TextureUsages,
        label: Option<&str>,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Material textures tile, unlike render targets.
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: label.map(|l| format!("{} sampler", l)).as_deref(),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size,
            format,
        }
    }

    /// Create a texture from RGBA8 image data.
    pub fn from_rgba8(
        ctx: &WgpuContext,
        width: u32,
        height: u32,
        data: &[u8],
        label: Option<&str>,
    ) -> Self {
        let format = wgpu::TextureFormat::Rgba8UnormSrgb;
        let usage = wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST;

        let texture = Self::new(ctx, width, height, format, usage, label);

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            texture.size,
        );

        texture
    }

    /// Decode an image file and upload it as an RGBA8 texture.
    pub fn from_path(ctx: &WgpuContext, path: &Path) -> Result<Self> {
        let image = image::open(path)
            .map_err(|source| BinderError::TextureDecode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();
        debug!("Loaded texture {} ({}x{})", path.display(), width, height);

        let label = path.to_string_lossy();
        Ok(Self::from_rgba8(
            ctx,
            width,
            height,
            image.as_raw(),
            Some(label.as_ref()),
        ))
    }

    /// Get the texture view.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Get the sampler.
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// Get the texture size.
    pub fn size(&self) -> (u32, u32) {
        (self.size.width, self.size.height)
    }

    /// Get the texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

impl std::fmt::Debug for Texture2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture2D")
            .field("size", &self.size())
            .field("format", &self.format)
            .finish()
    }
}

/// Loads textures from the filesystem through `image`.
#[derive(Debug, Clone)]
pub struct FileTextureLoader {
    ctx: WgpuContext,
}

impl FileTextureLoader {
    /// Create a loader uploading through `ctx`.
    pub fn new(ctx: WgpuContext) -> Self {
        Self { ctx }
    }
}

impl TextureLoader<Texture2D> for FileTextureLoader {
    fn load_texture(&self, path: &Path) -> Result<Arc<Texture2D>> {
        if !path.exists() {
            return Err(BinderError::TextureMissing(path.to_path_buf()));
        }
        Texture2D::from_path(&self.ctx, path).map(Arc::new)
    }
}
