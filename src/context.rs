//! Service context bundling the forge port and its configuration.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::LiveForgeClient;
use crate::adapters::recording::RecordingForgeClient;
use crate::adapters::replaying::ReplayingForgeClient;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::ForgeConfig;
use crate::ports::forge::ForgeClient;

/// Bundles the forge adapter with the configuration it was built from.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Forge client for tree requests.
    pub forge: Box<dyn ForgeClient>,
    /// Configuration shared with the resolver.
    pub config: ForgeConfig,
}

impl ServiceContext {
    /// Creates a live context talking to the configured forge.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: ForgeConfig) -> Result<Self, String> {
        let forge = LiveForgeClient::new(config.clone())
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self { forge: Box::new(forge), config })
    }

    /// Creates a live context whose forge interactions are recorded into a
    /// new session directory under `root`.
    ///
    /// The session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the session directory cannot
    /// be created.
    pub fn recording_at(
        config: ForgeConfig,
        root: &Path,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(root)?;
        let live = LiveForgeClient::new(config.clone())
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        let forge = RecordingForgeClient::new(Box::new(live), Arc::clone(&session.forge))
            .with_timeout(config.request_timeout());
        Ok((Self { forge: Box::new(forge), config }, session))
    }

    /// Creates a context that serves forge responses from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(config: ForgeConfig, path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let forge = ReplayingForgeClient::new(CassetteReplayer::new(&cassette));
        Ok(Self { forge: Box::new(forge), config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::resolver::TreeResolver;
    use serde_json::json;

    #[tokio::test]
    async fn replaying_context_drives_resolver() {
        let dir = std::env::temp_dir().join("repoviz_ctx_test_replay");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("forge.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "ctx");
        recorder.record(
            "forge",
            "fetch_tree",
            json!({"owner": "o", "repo": "r", "branch": "main"}),
            json!({"outcome": "not_found"}),
        );
        recorder.record(
            "forge",
            "fetch_tree",
            json!({"owner": "o", "repo": "r", "branch": "master"}),
            json!({"outcome": "found", "tree": [{"path": "lib/a.dart", "type": "blob"}]}),
        );
        recorder.finish().unwrap();

        let ctx = ServiceContext::replaying(ForgeConfig::default(), &path).unwrap();
        let resolver = TreeResolver::new(ctx.forge.as_ref(), &ctx.config);
        let list = resolver.resolve("o", "r").await.unwrap();

        assert_eq!(list.branch, "master");
        assert_eq!(list.paths().collect::<Vec<_>>(), vec!["lib/a.dart"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_cassette_is_an_error() {
        let result =
            ServiceContext::replaying(ForgeConfig::default(), Path::new("/no/such/cassette.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn recording_context_creates_session() {
        let root = std::env::temp_dir().join("repoviz_ctx_test_record");
        let (ctx, session) = ServiceContext::recording_at(ForgeConfig::default(), &root)
            .expect("recording context");
        assert!(session.output_dir().starts_with(&root));

        drop(ctx);
        let dir = session.finish().expect("finish after drop");
        assert!(dir.join(crate::cassette::session::FORGE_CASSETTE).exists());

        let _ = std::fs::remove_dir_all(&root);
    }
}
