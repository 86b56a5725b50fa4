//! Catalog of recognized material property names, grouped by category.
//!
//! Two parallel tables exist. The display table uses spaced, human-readable
//! labels for editors; the storage table uses concatenated names as they
//! appear in card files. They share category order, but they are kept as two
//! independent tables because they do not line up one-to-one:
//!
//! - `Architectural` has a leading `Model` entry in the storage table only.
//! - `Vector rendering` lists different properties in each table.
//! - `General` spells `Density` as `Denisty` in the display table.
//!
//! Import and export never validate against the catalog.

use serde::Serialize;

/// A category and the property names recognized under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropertyGroup {
    pub category: &'static str,
    pub properties: &'static [&'static str],
}

impl PropertyGroup {
    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains(&property)
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Property groups with human-readable names.
pub const DISPLAY_GROUPS: &[PropertyGroup] = &[
    PropertyGroup {
        category: "Meta",
        properties: &["Card Name", "Author And License", "Source"],
    },
    PropertyGroup {
        category: "General",
        properties: &[
            "Name",
            "Father",
            "Description",
            "Denisty",
            "Vendor",
            "ProductURL",
            "SpecificPrice",
        ],
    },
    PropertyGroup {
        category: "Mechanical",
        properties: &[
            "Youngs Modulus",
            "Poisson Ratio",
            "Ultimate Tensile Strength",
            "Compressive Strength",
            "Elasticity",
            "Fracture Toughness",
        ],
    },
    PropertyGroup {
        category: "Architectural",
        properties: &[
            "Execution Instructions",
            "Fire Resistance Class",
            "Standard Code",
            "Thermal Conductivity",
            "Sound Transmission Class",
            "Color",
            "Finish",
            "Units Per Quantity",
            "Environmental Efficiency Class",
        ],
    },
    PropertyGroup {
        category: "Rendering",
        properties: &[
            "Diffuse Color",
            "Ambient Color",
            "Specular Color",
            "Shininess",
            "Emissive Color",
            "Transparency",
            "Vertex Shader",
            "Fragment Shader",
            "Texture Path",
            "Texture Scaling",
        ],
    },
    PropertyGroup {
        category: "Vector rendering",
        properties: &[
            "View Color",
            "Father",
            "View Linewidth",
            "Section Color",
            "Section Fill Pattern",
            "Section Linewidth",
        ],
    },
    PropertyGroup {
        category: "User defined",
        properties: &[],
    },
];

/// Property groups with the names used as keys in card files.
pub const STORAGE_GROUPS: &[PropertyGroup] = &[
    PropertyGroup {
        category: "Meta",
        properties: &["CardName", "AuthorAndLicense", "Source"],
    },
    PropertyGroup {
        category: "General",
        properties: &[
            "Name",
            "Father",
            "Description",
            "Density",
            "Vendor",
            "ProductURL",
            "SpecificPrice",
        ],
    },
    PropertyGroup {
        category: "Mechanical",
        properties: &[
            "YoungsModulus",
            "PoissonRatio",
            "UltimateTensileStrength",
            "CompressiveStrength",
            "Elasticity",
            "FractureToughness",
        ],
    },
    PropertyGroup {
        category: "Architectural",
        properties: &[
            "Model",
            "ExecutionInstructions",
            "FireResistanceClass",
            "StandardCode",
            "ThermalConductivity",
            "SoundTransmissionClass",
            "Color",
            "Finish",
            "UnitsPerQuantity",
            "EnvironmentalEfficiencyClass",
        ],
    },
    PropertyGroup {
        category: "Rendering",
        properties: &[
            "DiffuseColor",
            "AmbientColor",
            "SpecularColor",
            "Shininess",
            "EmissiveColor",
            "Transparency",
            "VertexShader",
            "FragmentShader",
            "TexturePath",
            "TextureScaling",
        ],
    },
    PropertyGroup {
        category: "Vector rendering",
        properties: &[
            "ViewColor",
            "ViewFillPattern",
            "SectionFillPattern",
            "ViewLinewidth",
            "SectionLinewidth",
        ],
    },
    PropertyGroup {
        category: "User defined",
        properties: &[],
    },
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Return the property groups, with spaced display names when
/// `use_display_names` is set and storage names otherwise.
pub fn property_groups(use_display_names: bool) -> &'static [PropertyGroup] {
    if use_display_names {
        DISPLAY_GROUPS
    } else {
        STORAGE_GROUPS
    }
}

/// Find the first category listing `property`.
///
/// Some names (e.g. `Father`) appear under more than one category in the
/// display table; the earliest group wins.
pub fn category_of(property: &str, use_display_names: bool) -> Option<&'static str> {
    property_groups(use_display_names)
        .iter()
        .find(|group| group.contains(property))
        .map(|group| group.category)
}

/// Check whether `group`/`property` is a recognized storage-name pair.
pub fn is_known_property(group: &str, property: &str) -> bool {
    STORAGE_GROUPS
        .iter()
        .any(|g| g.category == group && g.contains(property))
}
