use std::path::PathBuf;

#[derive(Clone, Debug, Default)]
pub struct File {
    pub path: PathBuf,
    pub extname: String,
    pub content: String,
}

impl File {
    pub fn new(path: String) -> Self {
        let path = PathBuf::from(path);
        let extname = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path,
            extname,
            content: String::new(),
        }
    }

    pub fn set_content(mut self, content: String) -> Self {
        self.content = content;
        self
    }

    pub fn get_content_raw(&self) -> String {
        self.content.clone()
    }
}
