//! Scan pipeline: collect files, run both extractors, aggregate

use crate::aggregate::{Aggregator, ExtractionResult};
use crate::collector::{CollectorError, FileCollector, TraversalOrder, DEFAULT_EXTENSION};
use crate::extract::{AnnotationExtractor, ClientFieldExtractor, Extractor};
use crate::fs::FileSystem;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub extension: String,
    pub order: TraversalOrder,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            order: TraversalOrder::default(),
        }
    }
}

pub struct ApiSurfaceAnalyzer<'a, F: FileSystem> {
    fs: &'a F,
    config: AnalyzerConfig,
    annotations: AnnotationExtractor,
    client_fields: ClientFieldExtractor,
}

impl<'a, F: FileSystem> ApiSurfaceAnalyzer<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self::with_config(fs, AnalyzerConfig::default())
    }

    pub fn with_config(fs: &'a F, config: AnalyzerConfig) -> Self {
        Self {
            fs,
            config,
            annotations: AnnotationExtractor::new(),
            client_fields: ClientFieldExtractor::new(),
        }
    }

    /// Scans every disassembly file under `root`.
    ///
    /// Only an invalid root is an error; unreadable files are logged and
    /// skipped.
    pub fn analyze(&self, root: &Path) -> Result<ExtractionResult, CollectorError> {
        let start = Instant::now();
        let collector = FileCollector::new(self.fs, root)?
            .with_extension(self.config.extension.clone())
            .with_order(self.config.order);

        info!(
            root = %collector.root().display(),
            extension = %self.config.extension,
            order = ?self.config.order,
            "Starting smali scan"
        );

        let mut aggregator = Aggregator::new();

        for item in collector.collect() {
            let unit = match item {
                Ok(unit) => unit,
                Err(err) => {
                    warn!(error = %err, "Skipping unreadable entry");
                    aggregator.record_skipped();
                    continue;
                }
            };

            let annotations = self.annotations.extract(&unit.content);
            let client_fields = self.client_fields.extract(&unit.content);

            if !annotations.is_empty() || !client_fields.is_empty() {
                debug!(
                    path = %unit.path.display(),
                    annotations = annotations.len(),
                    client_fields = client_fields.len(),
                    "Extracted matches"
                );
            }

            aggregator.absorb(annotations, client_fields);
        }

        let files_scanned = aggregator.files_scanned();
        let files_skipped = aggregator.files_skipped();
        let result = aggregator.finish();

        info!(
            annotations = result.annotations.len(),
            client_fields = result.client_fields.len(),
            files_scanned,
            files_skipped,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Smali scan completed"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::HttpVerb;
    use crate::fs::MockFileSystem;

    const USERS_API: &str = r#".class public interface abstract Lcom/example/UsersApi;
.super Ljava/lang/Object;

.method public abstract list()Lretrofit2/Call;
    .annotation runtime Lretrofit2/http/GET;
        value = "/api/v1/users"
    .end annotation
.end method
"#;

    const HTTP_MODULE: &str = r#".class public final Lcom/example/HttpModule;
.super Ljava/lang/Object;

.field private final client:Lokhttp3/OkHttpClient;
.field private final json:Lokhttp3/MediaType;
"#;

    #[test]
    fn test_analyze_collects_both_kinds() {
        let fs = MockFileSystem::new();
        fs.add_file("smali/com/example/UsersApi.smali", USERS_API);
        fs.add_file("smali/com/example/HttpModule.smali", HTTP_MODULE);

        let result = ApiSurfaceAnalyzer::new(&fs)
            .analyze(Path::new("/mock"))
            .unwrap();

        assert_eq!(result.annotations.len(), 1);
        assert_eq!(result.annotations[0].method, HttpVerb::Get);
        assert_eq!(result.annotations[0].value(), "value = \"/api/v1/users\"");
        assert_eq!(result.client_fields.len(), 2);
    }

    #[test]
    fn test_analyze_preserves_traversal_order() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "A.smali",
            ".annotation runtime Lretrofit2/http/GET;\n/a\n.end annotation",
        );
        fs.add_file(
            "B.smali",
            ".annotation runtime Lretrofit2/http/POST;\n/b\n.end annotation",
        );

        let result = ApiSurfaceAnalyzer::new(&fs)
            .analyze(Path::new("/mock"))
            .unwrap();

        let values: Vec<&str> = result.annotations.iter().map(|m| m.value()).collect();
        assert_eq!(values, vec!["/a", "/b"]);
    }

    #[test]
    fn test_analyze_keeps_duplicates_across_files() {
        let fs = MockFileSystem::new();
        fs.add_file("one/UsersApi.smali", USERS_API);
        fs.add_file("two/UsersApi.smali", USERS_API);

        let result = ApiSurfaceAnalyzer::new(&fs)
            .analyze(Path::new("/mock"))
            .unwrap();

        assert_eq!(result.annotations.len(), 2);
        assert_eq!(result.annotations[0], result.annotations[1]);
    }

    #[test]
    fn test_analyze_skips_unreadable_files() {
        let fs = MockFileSystem::new();
        fs.add_unreadable("Broken.smali");
        fs.add_file("UsersApi.smali", USERS_API);

        let result = ApiSurfaceAnalyzer::new(&fs)
            .analyze(Path::new("/mock"))
            .unwrap();

        assert_eq!(result.annotations.len(), 1);
    }

    #[test]
    fn test_analyze_empty_tree() {
        let fs = MockFileSystem::new();
        fs.add_file("AndroidManifest.xml", "<manifest/>");

        let result = ApiSurfaceAnalyzer::new(&fs)
            .analyze(Path::new("/mock"))
            .unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_analyze_missing_root() {
        let fs = MockFileSystem::new();
        let result = ApiSurfaceAnalyzer::new(&fs).analyze(Path::new("/elsewhere"));
        assert!(matches!(result, Err(CollectorError::RootNotFound(_))));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let fs = MockFileSystem::new();
        fs.add_file("UsersApi.smali", USERS_API);
        fs.add_file("HttpModule.smali", HTTP_MODULE);

        let analyzer = ApiSurfaceAnalyzer::new(&fs);
        let first = analyzer.analyze(Path::new("/mock")).unwrap();
        let second = analyzer.analyze(Path::new("/mock")).unwrap();

        assert_eq!(first, second);
    }
}
