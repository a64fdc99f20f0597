//! Coordinates retrieval, answering, chat history, birth charts and indexing.

use crate::astrology::{BirthQuery, Chart, HoroscopeCalculator, HoroscopeError};
use crate::chunking::TextChunker;
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{RaavanError, Result};
use crate::rag::{AnswerService, Answerer, ContextRetriever, WARNING_MARKER};
use crate::session::{ChatTurn, SessionHistory};
use crate::vector_store::{
    Document, EmbeddingIndex, IndexedSource, MemoryVectorStore, SqliteVectorStore, VectorIndex,
    VectorStore,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// File extensions picked up by [`Orchestrator::index_path`].
const INDEXABLE_EXTENSIONS: &[&str] = &["txt", "md"];

/// The main orchestrator for Raavan.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    answerer: Arc<dyn Answerer>,
    calculator: HoroscopeCalculator,
    retriever: Option<ContextRetriever>,
    vector_store: Option<Arc<dyn VectorStore>>,
    embedder: Option<Arc<dyn Embedder>>,
    history: SessionHistory,
}

impl Orchestrator {
    /// Create an orchestrator from settings.
    ///
    /// A knowledge base that cannot be opened is logged and skipped; questions are then answered
    /// without retrieved context.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
        let answerer: Arc<dyn Answerer> =
            Arc::new(AnswerService::new(&settings.llm, &prompts.persona.system)?);

        let mut orchestrator = Self::with_components(
            settings,
            prompts,
            answerer,
            HoroscopeCalculator::default(),
        );

        if let Some((store, embedder)) = open_knowledge_base(&orchestrator.settings)? {
            orchestrator = orchestrator.with_knowledge_base(store, embedder);
        }
        Ok(orchestrator)
    }

    /// Create an orchestrator with custom components and no knowledge base.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        answerer: Arc<dyn Answerer>,
        calculator: HoroscopeCalculator,
    ) -> Self {
        Self {
            settings,
            prompts,
            answerer,
            calculator,
            retriever: None,
            vector_store: None,
            embedder: None,
            history: SessionHistory::new(),
        }
    }

    /// Attach a vector store and embedder, used for both retrieval and indexing.
    pub fn with_knowledge_base(
        mut self,
        vector_store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        let index = Arc::new(EmbeddingIndex::new(vector_store.clone(), embedder.clone()));
        self.vector_store = Some(vector_store);
        self.embedder = Some(embedder);
        self.with_index(index)
    }

    /// Retrieve from `index` without enabling indexing.
    pub fn with_index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        let timeout = Duration::from_secs(self.settings.rag.retrieval_timeout_secs);
        self.retriever = Some(ContextRetriever::new(index).with_timeout(timeout));
        self
    }

    pub fn has_knowledge_base(&self) -> bool {
        self.retriever.is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    /// This session's turns, oldest first.
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Answer a question and record the turn in this session's history.
    pub async fn ask(&mut self, question: &str) -> ChatTurn {
        let mut history = std::mem::take(&mut self.history);
        let turn = self.ask_with_history(&mut history, question).await;
        self.history = history;
        turn
    }

    /// Answer a question and append exactly one turn to `history`.
    ///
    /// Failures never escape: they become a failed turn whose answer starts with `⚠`.
    #[instrument(skip(self, history))]
    pub async fn ask_with_history(&self, history: &mut SessionHistory, question: &str) -> ChatTurn {
        let context = match &self.retriever {
            Some(retriever) => match retriever.retrieve(question, self.settings.rag.top_k).await {
                Ok(context) => {
                    debug!("Using {} context chunks", context.chunk_count);
                    context.text
                }
                Err(e) => {
                    warn!("Retrieval failed, not calling the model: {}", e);
                    let turn = ChatTurn::failed(question, format!("{} {}", WARNING_MARKER, e));
                    history.append(turn.clone());
                    return turn;
                }
            },
            None => {
                warn!("No knowledge base available, answering without context");
                String::new()
            }
        };

        let turn = match self.answerer.answer(question, &context).await {
            Ok(answer) => ChatTurn::answered(question, answer),
            Err(e) => {
                warn!("Answer failed: {}", e);
                ChatTurn::failed(question, e.user_message())
            }
        };

        history.append(turn.clone());
        turn
    }

    /// Compute a birth chart. Invalid queries never reach the ephemeris.
    #[instrument(skip(self), fields(name = %query.name))]
    pub fn horoscope(&self, query: &BirthQuery) -> std::result::Result<Chart, HoroscopeError> {
        query.validate()?;
        self.calculator.compute_chart(&query.datetime)
    }

    fn knowledge_base(&self) -> Result<(&Arc<dyn VectorStore>, &Arc<dyn Embedder>)> {
        match (&self.vector_store, &self.embedder) {
            (Some(store), Some(embedder)) => Ok((store, embedder)),
            _ => Err(RaavanError::Config(
                "No knowledge base configured (vector_store.provider is \"none\" or failed to open)"
                    .to_string(),
            )),
        }
    }

    /// Chunk, embed and store every `.txt`/`.md` file under `path`.
    ///
    /// Each file is keyed by its path relative to `path`. Re-indexing a file replaces its
    /// previous chunks only once the new ones are embedded.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn index_path(&self, path: &Path) -> Result<IndexReport> {
        let (store, embedder) = self.knowledge_base()?;
        let chunker = TextChunker::from_settings(&self.settings.chunking)?;

        let files = collect_files(path)?;
        if files.is_empty() {
            return Err(RaavanError::InvalidInput(format!(
                "No .txt or .md files found at {}",
                path.display()
            )));
        }
        let root = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };

        let mut report = IndexReport::default();
        for file in files {
            let (source, title) = source_names(root, &file);
            let text = std::fs::read_to_string(&file)?;
            let chunks = chunker.chunk(&text);

            let embeddings = if chunks.is_empty() {
                warn!("{} has no text", file.display());
                Vec::new()
            } else {
                let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
                embedder.embed_batch(&texts).await?
            };

            let documents: Vec<Document> = chunks
                .into_iter()
                .zip(embeddings)
                .map(|(chunk, embedding)| {
                    Document::new(
                        source.clone(),
                        title.clone(),
                        chunk.content,
                        embedding,
                        chunk.order,
                    )
                })
                .collect();

            let count = store.replace_source(&source, &documents).await?;
            info!("Indexed {} chunks from {}", count, file.display());
            report.total_chunks += count;
            report.files.push(IndexedFile {
                source,
                chunks: count,
            });
        }

        Ok(report)
    }

    /// Document count and per-source summary of the knowledge base.
    pub async fn stats(&self) -> Result<KnowledgeBaseStats> {
        let (store, embedder) = self.knowledge_base()?;
        Ok(KnowledgeBaseStats {
            document_count: store.document_count().await?,
            sources: store.list_sources().await?,
            provider: self.settings.vector_store.provider.clone(),
            embedding_model: embedder.model().to_string(),
        })
    }
}

/// Open the configured store and embedder. `Ok(None)` means run without one.
fn open_knowledge_base(
    settings: &Settings,
) -> Result<Option<(Arc<dyn VectorStore>, Arc<dyn Embedder>)>> {
    let store: Arc<dyn VectorStore> = match settings.vector_store.provider.as_str() {
        "none" => return Ok(None),
        "memory" => Arc::new(MemoryVectorStore::new()),
        "sqlite" => match SqliteVectorStore::new(&settings.sqlite_path()) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(
                    "Could not open knowledge base at {}: {}",
                    settings.sqlite_path().display(),
                    e
                );
                return Ok(None);
            }
        },
        other => {
            return Err(RaavanError::Config(format!(
                "Unknown vector store provider: {} (expected sqlite, memory or none)",
                other
            )))
        }
    };

    match OpenAIEmbedder::from_settings(&settings.embedding) {
        Ok(embedder) => Ok(Some((store, Arc::new(embedder)))),
        Err(e) => {
            warn!("Could not create embedding client: {}", e);
            Ok(None)
        }
    }
}

/// `path` itself if it is a file, otherwise every indexable file below it, sorted.
fn collect_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(RaavanError::InvalidInput(format!(
            "Path does not exist: {}",
            path.display()
        )));
    }

    let mut files = Vec::new();
    let mut pending = vec![path.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let entry_path = entry?.path();
            if entry_path.is_dir() {
                pending.push(entry_path);
            } else if is_indexable(&entry_path) {
                files.push(entry_path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn is_indexable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| INDEXABLE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Source id (`file` relative to `root`, `/`-separated) and display title (the stem) for a file.
fn source_names(root: &Path, file: &Path) -> (String, String) {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let source = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let title = file
        .file_stem()
        .map(|s| s.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_else(|| source.clone());
    (source, title)
}

/// Result of indexing a path.
#[derive(Debug, Default, Serialize)]
pub struct IndexReport {
    pub files: Vec<IndexedFile>,
    pub total_chunks: usize,
}

#[derive(Debug, Serialize)]
pub struct IndexedFile {
    pub source: String,
    pub chunks: usize,
}

/// Summary of the knowledge base.
#[derive(Debug, Serialize)]
pub struct KnowledgeBaseStats {
    pub document_count: usize,
    pub sources: Vec<IndexedSource>,
    pub provider: String,
    pub embedding_model: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astrology::{Body, Ephemeris, EphemerisError};
    use crate::rag::AnswerError;
    use crate::session::TurnOutcome;
    use crate::vector_store::RetrievedChunk;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every (question, context) pair it is asked.
    #[derive(Default)]
    struct RecordingAnswerer {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Answerer for RecordingAnswerer {
        async fn answer(&self, question: &str, context: &str) -> std::result::Result<String, AnswerError> {
            self.calls
                .lock()
                .unwrap()
                .push((question.to_string(), context.to_string()));
            Ok(format!("I, Raavan, answer: {}", question))
        }
    }

    struct FailingAnswerer;

    #[async_trait]
    impl Answerer for FailingAnswerer {
        async fn answer(&self, _question: &str, _context: &str) -> std::result::Result<String, AnswerError> {
            Err(AnswerError::MalformedResponse("Missing key 'choices'".to_string()))
        }
    }

    struct StaticIndex(Vec<&'static str>);

    #[async_trait]
    impl VectorIndex for StaticIndex {
        async fn similarity_search(&self, _query: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
            Ok(self.0.iter().take(k).map(|t| RetrievedChunk::new(*t, 0.9)).collect())
        }
    }

    struct BrokenIndex;

    #[async_trait]
    impl VectorIndex for BrokenIndex {
        async fn similarity_search(&self, _query: &str, _k: usize) -> Result<Vec<RetrievedChunk>> {
            Err(RaavanError::VectorStore("collection not found".to_string()))
        }
    }

    /// Counts calls so tests can check the ephemeris was never consulted.
    #[derive(Default)]
    struct CountingEphemeris {
        calls: AtomicUsize,
    }

    impl Ephemeris for CountingEphemeris {
        fn longitude(&self, _julian_day: f64, _body: Body) -> std::result::Result<f64, EphemerisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(100.0)
        }
    }

    /// Hashes letters onto a small vector so indexing tests need no network.
    struct LetterEmbedder;

    #[async_trait]
    impl Embedder for LetterEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let mut v = vec![0.0; 4];
            for (i, c) in text.chars().filter(|c| c.is_alphabetic()).enumerate() {
                v[(c as usize + i) % 4] += 1.0;
            }
            Ok(v)
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut out = Vec::new();
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn model(&self) -> &str {
            "letters"
        }
    }

    fn orchestrator(answerer: Arc<dyn Answerer>) -> Orchestrator {
        Orchestrator::with_components(
            Settings::default(),
            Prompts::default(),
            answerer,
            HoroscopeCalculator::default(),
        )
    }

    fn birth(name: &str, location: &str) -> BirthQuery {
        let datetime = NaiveDate::from_ymd_opt(1990, 8, 15)
            .unwrap()
            .and_hms_opt(4, 45, 0)
            .unwrap();
        BirthQuery::new(name, datetime, location)
    }

    #[tokio::test]
    async fn test_ask_passes_joined_context() {
        let answerer = Arc::new(RecordingAnswerer::default());
        let mut orch = orchestrator(answerer.clone())
            .with_index(Arc::new(StaticIndex(vec!["Ravana ruled Lanka.", "Lanka was golden."])));

        let turn = orch.ask("Who ruled Lanka?").await;
        assert_eq!(turn.outcome, TurnOutcome::Answered);
        assert_eq!(turn.answer, "I, Raavan, answer: Who ruled Lanka?");

        let calls = answerer.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "Ravana ruled Lanka.\n\nLanka was golden.");
        assert_eq!(orch.history().len(), 1);
    }

    #[tokio::test]
    async fn test_no_knowledge_base_uses_empty_context() {
        let answerer = Arc::new(RecordingAnswerer::default());
        let mut orch = orchestrator(answerer.clone());
        assert!(!orch.has_knowledge_base());

        orch.ask("Who is Kumbhakarna?").await;
        assert_eq!(answerer.calls.lock().unwrap()[0].1, "");
    }

    #[tokio::test]
    async fn test_retrieval_failure_skips_model() {
        let answerer = Arc::new(RecordingAnswerer::default());
        let mut orch = orchestrator(answerer.clone()).with_index(Arc::new(BrokenIndex));

        let turn = orch.ask("Who is Sita?").await;
        assert!(turn.is_failed());
        assert!(turn.answer.starts_with("⚠ Error retrieving context:"));
        assert!(answerer.calls.lock().unwrap().is_empty());
        assert_eq!(orch.history().all(), &[turn]);
    }

    #[tokio::test]
    async fn test_answer_failure_becomes_failed_turn() {
        let mut orch = orchestrator(Arc::new(FailingAnswerer));

        let turn = orch.ask("Who is Sita?").await;
        assert_eq!(turn.outcome, TurnOutcome::Failed);
        assert_eq!(turn.answer, "⚠ API response error: Missing key 'choices'");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_records_one_failed_turn() {
        let mut settings = Settings::default();
        settings.llm.api_base = "http://127.0.0.1:1/v1".to_string();
        settings.llm.timeout_secs = 5;
        let service = AnswerService::new(&settings.llm, "system")
            .unwrap()
            .with_api_key("test-key");

        let mut orch = Orchestrator::with_components(
            settings,
            Prompts::default(),
            Arc::new(service),
            HoroscopeCalculator::default(),
        );

        let turn = orch.ask("Where is Ayodhya?").await;
        assert_eq!(orch.history().len(), 1);
        assert!(turn.answer.starts_with("⚠ Network error"));
        assert_eq!(orch.history().last(), Some(&turn));
    }

    #[tokio::test]
    async fn test_history_order_and_clear() {
        let mut orch = orchestrator(Arc::new(RecordingAnswerer::default()));
        for q in ["first", "second", "third"] {
            orch.ask(q).await;
        }

        let questions: Vec<&str> = orch.history().all().iter().map(|t| t.question.as_str()).collect();
        assert_eq!(questions, vec!["first", "second", "third"]);

        orch.clear_history();
        assert!(orch.history().is_empty());
    }

    #[tokio::test]
    async fn test_shared_history_for_server_sessions() {
        let orch = orchestrator(Arc::new(RecordingAnswerer::default()));
        let mut history = SessionHistory::new();

        orch.ask_with_history(&mut history, "one").await;
        orch.ask_with_history(&mut history, "two").await;
        assert_eq!(history.len(), 2);
        assert!(orch.history().is_empty());
    }

    #[test]
    fn test_horoscope_validates_before_computing() {
        let ephemeris = Arc::new(CountingEphemeris::default());
        let orch = Orchestrator::with_components(
            Settings::default(),
            Prompts::default(),
            Arc::new(RecordingAnswerer::default()),
            HoroscopeCalculator::new(ephemeris.clone()),
        );

        let err = orch.horoscope(&birth("Meghnad", "  ")).unwrap_err();
        assert_eq!(err.to_string(), "Please provide both name and birth location.");
        assert_eq!(ephemeris.calls.load(Ordering::SeqCst), 0);

        let chart = orch.horoscope(&birth("Meghnad", "Lanka")).unwrap();
        assert_eq!(chart.len(), 10);
        assert_eq!(ephemeris.calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_index_path_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("sundara_kanda.txt"),
            "Hanuman leapt across the ocean.\n\nHe found Sita in the Ashoka grove.",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.md"), "Vibhishana joined Rama.").unwrap();
        std::fs::write(dir.path().join("ignored.pdf"), "binary").unwrap();

        let answerer = Arc::new(RecordingAnswerer::default());
        let mut orch = orchestrator(answerer.clone())
            .with_knowledge_base(Arc::new(MemoryVectorStore::new()), Arc::new(LetterEmbedder));

        let report = orch.index_path(dir.path()).await.unwrap();
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.total_chunks, 2);

        // re-indexing replaces rather than duplicates
        orch.index_path(dir.path()).await.unwrap();
        let stats = orch.stats().await.unwrap();
        assert_eq!(stats.document_count, 2);
        assert_eq!(stats.embedding_model, "letters");
        let mut sources: Vec<&str> = stats.sources.iter().map(|s| s.source.as_str()).collect();
        sources.sort();
        assert_eq!(sources, vec!["notes.md", "sundara_kanda.txt"]);

        orch.ask("Where was Sita?").await;
        assert!(!answerer.calls.lock().unwrap()[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_index_without_knowledge_base_fails() {
        let orch = orchestrator(Arc::new(RecordingAnswerer::default()));
        let err = orch.index_path(Path::new("/tmp")).await.unwrap_err();
        assert!(matches!(err, RaavanError::Config(_)));
        assert!(orch.stats().await.is_err());
    }

    #[tokio::test]
    async fn test_same_stem_files_are_kept_apart() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("bala.txt"), "Rama is born in Ayodhya.").unwrap();
        std::fs::write(dir.path().join("bala.md"), "Vishvamitra asks for Rama.").unwrap();
        std::fs::write(dir.path().join("sub").join("bala.txt"), "Rama breaks the bow.").unwrap();

        let orch = orchestrator(Arc::new(RecordingAnswerer::default()))
            .with_knowledge_base(Arc::new(MemoryVectorStore::new()), Arc::new(LetterEmbedder));

        let report = orch.index_path(dir.path()).await.unwrap();
        assert_eq!(report.total_chunks, 3);

        let stats = orch.stats().await.unwrap();
        assert_eq!(stats.document_count, report.total_chunks);
        let mut sources: Vec<&str> = stats.sources.iter().map(|s| s.source.as_str()).collect();
        sources.sort();
        assert_eq!(sources, vec!["bala.md", "bala.txt", "sub/bala.txt"]);
    }

    /// Embeds normally until `fail` is set.
    #[derive(Default)]
    struct SwitchableEmbedder {
        fail: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl Embedder for SwitchableEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(RaavanError::Embedding("embeddings server down".to_string()));
            }
            LetterEmbedder.embed(text).await
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut out = Vec::new();
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn model(&self) -> &str {
            "switchable"
        }
    }

    #[tokio::test]
    async fn test_failed_reindex_keeps_previous_chunks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ayodhya.txt"), "Rama is exiled for fourteen years.").unwrap();

        let embedder = Arc::new(SwitchableEmbedder::default());
        let orch = orchestrator(Arc::new(RecordingAnswerer::default()))
            .with_knowledge_base(Arc::new(MemoryVectorStore::new()), embedder.clone());

        orch.index_path(dir.path()).await.unwrap();
        assert_eq!(orch.stats().await.unwrap().document_count, 1);

        embedder.fail.store(true, Ordering::SeqCst);
        let err = orch.index_path(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("embeddings server down"));
        assert_eq!(orch.stats().await.unwrap().document_count, 1);
    }

    #[tokio::test]
    async fn test_emptied_file_drops_its_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("aranya.txt");
        std::fs::write(&file, "Surpanakha meets Rama.").unwrap();

        let orch = orchestrator(Arc::new(RecordingAnswerer::default()))
            .with_knowledge_base(Arc::new(MemoryVectorStore::new()), Arc::new(LetterEmbedder));
        orch.index_path(&file).await.unwrap();

        std::fs::write(&file, "   \n").unwrap();
        let report = orch.index_path(&file).await.unwrap();
        assert_eq!(report.files[0].source, "aranya.txt");
        assert_eq!(report.total_chunks, 0);
        assert_eq!(orch.stats().await.unwrap().document_count, 0);
    }

    #[test]
    fn test_source_names() {
        let (source, title) = source_names(
            Path::new("/data"),
            Path::new("/data/kandas/yuddha-kanda_part_1.txt"),
        );
        assert_eq!(source, "kandas/yuddha-kanda_part_1.txt");
        assert_eq!(title, "yuddha kanda part 1");
        assert!(is_indexable(Path::new("a/B.MD")));
        assert!(!is_indexable(Path::new("a/b.pdf")));
    }
}
