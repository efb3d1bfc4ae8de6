// src/types/mod.rs
pub mod dates;
pub mod lenient;
pub mod profile;
pub mod resume;
pub mod template_config;

pub use dates::ProfileDate;
pub use profile::Profile;
pub use resume::{Customizations, FontSize, Resume, Spacing, Visibility};
pub use template_config::{
    HeadingStyle, LayoutType, SectionConfig, SectionType, SectionVariant, TemplateConfiguration,
};
