// src/config.rs
use std::path::PathBuf;

/// Settings for one render/generation run.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub template: String,
    pub person_name: Option<String>,
    pub output_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub root_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        // Capture the current directory at creation time
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            template: "default".to_string(),
            person_name: None,
            output_dir: PathBuf::from("output"),
            templates_dir: PathBuf::from("templates"),
            root_dir: current_dir,
        }
    }

    pub fn with_template(mut self, template: String) -> Self {
        self.template = template;
        self
    }

    pub fn with_person_name(mut self, person_name: String) -> Self {
        self.person_name = Some(person_name);
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_templates_dir(mut self, dir: PathBuf) -> Self {
        self.templates_dir = dir;
        self
    }

    fn absolute_path(&self, path: &PathBuf) -> PathBuf {
        if path.is_absolute() {
            path.clone()
        } else {
            self.root_dir.join(path)
        }
    }

    pub fn output_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.output_dir)
    }

    pub fn templates_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.templates_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_absolute_paths() {
        let config = RenderConfig::new()
            .with_template("modern".to_string())
            .with_person_name("ada".to_string())
            .with_output_dir(PathBuf::from("out"))
            .with_templates_dir(PathBuf::from("/srv/templates"));

        assert_eq!(config.template, "modern");
        assert_eq!(config.person_name.as_deref(), Some("ada"));
        assert_eq!(config.output_dir_absolute(), config.root_dir.join("out"));
        assert_eq!(config.templates_dir_absolute(), PathBuf::from("/srv/templates"));
    }
}
