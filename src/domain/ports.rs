use crate::domain::model::{Labels, Report, Submission};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Raw threshold text; `None` means ask the user once.
    fn threshold(&self) -> Option<&str>;
    fn input_file(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn delimiter(&self) -> char;
    fn labels(&self) -> Labels;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Submission>>;
    async fn load(&self, report: Report) -> Result<String>;
}
