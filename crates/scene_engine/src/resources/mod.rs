//! Resource handles
//!
//! The scene core never parses files. A host-side [`ResourceLoader`] turns
//! paths into handles and the nodes hold those handles. A load failure shows
//! up as an absent handle, which renderable nodes treat as "draw nothing".

use std::path::Path;

/// Handle to a GPU texture together with its pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    /// Backend identifier
    pub id: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl TextureHandle {
    /// Create a texture handle
    pub fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

/// Handle to a compiled shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Handle to an uploaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Handle to a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u32);

/// A loaded resource of any kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Image uploaded as a texture
    Texture(TextureHandle),
    /// Compiled shader program
    Shader(ShaderHandle),
    /// Mesh geometry
    Mesh(MeshHandle),
    /// Material description
    Material(MaterialHandle),
}

impl Resource {
    /// The texture, if this is one
    pub fn as_texture(&self) -> Option<TextureHandle> {
        match self {
            Self::Texture(texture) => Some(*texture),
            _ => None,
        }
    }

    /// The mesh, if this is one
    pub fn as_mesh(&self) -> Option<MeshHandle> {
        match self {
            Self::Mesh(mesh) => Some(*mesh),
            _ => None,
        }
    }
}

/// Resource category, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `png`, `jpg`, `jpeg`, `bmp`, `tga`
    Texture,
    /// `glsl`, `shader`, `vert`, `frag`
    Shader,
    /// `obj`, `gltf`, `glb`
    Mesh,
    /// `yaml`, `yml`, `mtl`
    Material,
}

impl ResourceKind {
    /// Classify a path by its extension, case-insensitively
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "png" | "jpg" | "jpeg" | "bmp" | "tga" => Some(Self::Texture),
            "glsl" | "shader" | "vert" | "frag" => Some(Self::Shader),
            "obj" | "gltf" | "glb" => Some(Self::Mesh),
            "yaml" | "yml" | "mtl" => Some(Self::Material),
            _ => None,
        }
    }
}

/// Host-provided resource cache
pub trait ResourceLoader {
    /// Load the resource at `path`, or return the cached one.
    ///
    /// Returns `None` when the file is missing or cannot be decoded; the
    /// loader is responsible for reporting why.
    fn load_or_get(&mut self, path: &str) -> Option<Resource>;

    /// Convenience wrapper that only accepts textures
    fn load_texture(&mut self, path: &str) -> Option<TextureHandle> {
        self.load_or_get(path).and_then(|resource| resource.as_texture())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(ResourceKind::from_path("sprites/ship.PNG"), Some(ResourceKind::Texture));
        assert_eq!(ResourceKind::from_path("shaders/sprite.frag"), Some(ResourceKind::Shader));
        assert_eq!(ResourceKind::from_path("models/teapot.obj"), Some(ResourceKind::Mesh));
        assert_eq!(ResourceKind::from_path("materials/metal.yaml"), Some(ResourceKind::Material));
        assert_eq!(ResourceKind::from_path("README"), None);
        assert_eq!(ResourceKind::from_path("notes.txt"), None);
    }

    struct MapLoader(HashMap<String, Resource>);

    impl ResourceLoader for MapLoader {
        fn load_or_get(&mut self, path: &str) -> Option<Resource> {
            self.0.get(path).copied()
        }
    }

    #[test]
    fn test_load_texture_filters_kind() {
        let mut loader = MapLoader(HashMap::from([
            ("a.png".to_string(), Resource::Texture(TextureHandle::new(1, 16, 16))),
            ("b.obj".to_string(), Resource::Mesh(MeshHandle(2))),
        ]));

        assert_eq!(loader.load_texture("a.png"), Some(TextureHandle::new(1, 16, 16)));
        assert_eq!(loader.load_texture("b.obj"), None);
        assert_eq!(loader.load_texture("missing.png"), None);
    }
}
