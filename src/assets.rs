//! Texture handle table
//!
//! Textures are named by [`TextureId`] and resolved to backend handles once at
//! load time. Nothing in the simulation looks textures up by path.

use serde::{Deserialize, Serialize};

/// Every texture the two scenes use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    Brick,
    Wood,
    Stone,
    Metal,
    Grass,
    Water,
}

impl TextureId {
    /// All variants, in table order
    pub const ALL: [TextureId; 6] = [
        TextureId::Brick,
        TextureId::Wood,
        TextureId::Stone,
        TextureId::Metal,
        TextureId::Grass,
        TextureId::Water,
    ];

    /// Textures an obstacle may be drawn with
    pub const OBSTACLES: [TextureId; 4] = [
        TextureId::Brick,
        TextureId::Wood,
        TextureId::Stone,
        TextureId::Metal,
    ];

    /// Asset path relative to the asset root
    pub fn path(&self) -> &'static str {
        match self {
            TextureId::Brick => "textures/brick.png",
            TextureId::Wood => "textures/wood.png",
            TextureId::Stone => "textures/stone.png",
            TextureId::Metal => "textures/metal.png",
            TextureId::Grass => "textures/grass.png",
            TextureId::Water => "textures/water.png",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Backend handles indexed by [`TextureId`]
#[derive(Debug, Clone)]
pub struct TextureTable<H> {
    handles: Vec<H>,
}

impl<H> TextureTable<H> {
    /// Resolve every texture through `load`, stopping at the first failure
    pub fn resolve<E, F>(mut load: F) -> Result<Self, E>
    where
        F: FnMut(TextureId, &'static str) -> Result<H, E>,
    {
        let mut handles = Vec::with_capacity(TextureId::ALL.len());
        for id in TextureId::ALL {
            handles.push(load(id, id.path())?);
            log::debug!("Resolved texture {:?} ({})", id, id.path());
        }
        Ok(Self { handles })
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> &H {
        &self.handles[id.index()]
    }
}
