use std::fmt;

/// Identifier of a palette entry. Always a valid index into [`PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MaterialId(u8);

impl MaterialId {
    pub fn new(raw: u8) -> Option<Self> {
        if (raw as usize) < PALETTE.len() {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn material(self) -> &'static Material {
        &PALETTE[self.0 as usize]
    }

    pub fn all() -> impl Iterator<Item = MaterialId> {
        (0..PALETTE.len() as u8).map(MaterialId)
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct Material {
    pub id: MaterialId,
    pub name: &'static str,
    pub color_name: &'static str,
}

impl Material {
    pub fn rgba(&self) -> [u8; 4] {
        color_name_to_rgba(self.color_name)
    }

    /// Text shown next to the swatch in the palette list.
    pub fn label(&self) -> String {
        format!("{} (ID: {})", self.name, self.id)
    }
}

pub static PALETTE: [Material; 10] = [
    Material { id: MaterialId(0), name: "White", color_name: "white" },
    Material { id: MaterialId(1), name: "Grey", color_name: "grey" },
    Material { id: MaterialId(2), name: "Red", color_name: "red" },
    Material { id: MaterialId(3), name: "Green", color_name: "green" },
    Material { id: MaterialId(4), name: "Brown", color_name: "saddlebrown" }, // wood
    Material { id: MaterialId(5), name: "Blue", color_name: "blue" },
    Material { id: MaterialId(6), name: "Yellow", color_name: "yellow" },
    Material { id: MaterialId(7), name: "Purple", color_name: "purple" },
    Material { id: MaterialId(8), name: "Orange", color_name: "orange" },
    Material { id: MaterialId(9), name: "Black", color_name: "black" },
];

/// X11 colour names used by the palette and the UI chrome.
pub fn color_name_to_rgba(color_name: &str) -> [u8; 4] {
    match color_name.to_lowercase().as_str() {
        "white" => [255, 255, 255, 255],
        "grey" | "gray" => [190, 190, 190, 255],
        "red" => [255, 0, 0, 255],
        "green" => [0, 255, 0, 255],
        "saddlebrown" => [139, 69, 19, 255],
        "blue" => [0, 0, 255, 255],
        "yellow" => [255, 255, 0, 255],
        "purple" => [160, 32, 240, 255],
        "orange" => [255, 165, 0, 255],
        "black" => [0, 0, 0, 255],
        _ => [255, 255, 255, 255], // Default to white
    }
}
