/// Unit tests for ShaderCompiler and CompiledProgram

use super::*;
use crate::context::mock_context::{ContextCall, MockContext, ARBFP1, FP40, VP40};
use crate::fx::Runtime;
use crate::fx::log::{LogEntry, LogSeverity, Logger};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

const UNIT: &str = "float4 color;\nfloat4 vs_main() { return color; }";

/// Keeps only entries from the thread that installed it
struct TestLogger {
    thread: ThreadId,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        if thread::current().id() != self.thread {
            return;
        }
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn capture_errors<F: FnOnce()>(f: F) -> Vec<LogEntry> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Runtime::set_logger(TestLogger {
        thread: thread::current().id(),
        entries: entries.clone(),
    });
    f();
    Runtime::reset_logger();
    let captured = entries.lock().unwrap().clone();
    captured.into_iter().filter(|e| e.severity == LogSeverity::Error).collect()
}

fn contexts() -> (Rc<MockContext>, Rc<dyn GraphicsContext>) {
    let mock = Rc::new(MockContext::new());
    let context: Rc<dyn GraphicsContext> = mock.clone();
    (mock, context)
}

fn verbose(on: bool) -> ShaderCompiler {
    ShaderCompiler::new(EffectConfig {
        verbose_diagnostics: on,
        ..Default::default()
    })
}

// ============================================================================
// Profile resolution
// ============================================================================

#[test]
fn test_auto_profile_resolves_per_stage() {
    let (mock, _) = contexts();
    let compiler = ShaderCompiler::default();
    assert_eq!(compiler.resolve_profile(&*mock, ShaderStage::Vertex, "auto"), VP40);
    assert_eq!(compiler.resolve_profile(&*mock, ShaderStage::Fragment, "auto"), FP40);
}

#[test]
fn test_named_profile_resolves_by_name() {
    let (mock, _) = contexts();
    let compiler = ShaderCompiler::default();
    assert_eq!(compiler.resolve_profile(&*mock, ShaderStage::Fragment, "arbfp1"), ARBFP1);
    assert_eq!(
        compiler.resolve_profile(&*mock, ShaderStage::Vertex, "vs_9_9"),
        Profile::UNKNOWN
    );
}

// ============================================================================
// Compilation
// ============================================================================

#[test]
#[serial]
fn test_successful_compile() {
    let (mock, context) = contexts();
    let mut compilation = None;
    let errors = capture_errors(|| {
        compilation = Some(verbose(true).compile(&context, ShaderStage::Vertex, VP40, "vs_main", UNIT));
    });
    let compilation = compilation.unwrap();

    assert!(errors.is_empty());
    assert!(compilation.diagnostic.is_none());
    assert!(compilation.program.is_valid());
    assert_eq!(compilation.program.stage(), ShaderStage::Vertex);
    assert_eq!(compilation.program.profile(), VP40);
    assert_eq!(mock.program_source(compilation.program.handle()).as_deref(), Some(UNIT));
}

#[test]
#[serial]
fn test_compiler_error_keeps_listing_and_logs_when_verbose() {
    let (_mock, context) = contexts();
    let mut compilation = None;
    let errors = capture_errors(|| {
        compilation = Some(verbose(true).compile(&context, ShaderStage::Fragment, FP40, "ps_main", UNIT));
    });
    let compilation = compilation.unwrap();

    assert!(!compilation.program.is_valid());
    let diagnostic = compilation.diagnostic.unwrap();
    assert_eq!(diagnostic.stage, ShaderStage::Fragment);
    assert_eq!(diagnostic.entry_point, "ps_main");
    assert!(diagnostic.listing.is_some());
    assert!(format!("{}", diagnostic).contains("fragment program 'ps_main'"));

    assert_eq!(errors.len(), 3);
    assert!(errors[1].message.contains("float4 color;"));
    assert!(errors[2].message.contains("ps_main"));
}

#[test]
#[serial]
fn test_non_compiler_error_has_no_listing() {
    let (_mock, context) = contexts();
    let mut compilation = None;
    let errors = capture_errors(|| {
        compilation = Some(verbose(true).compile(
            &context, ShaderStage::Vertex, Profile::UNKNOWN, "vs_main", UNIT,
        ));
    });
    let diagnostic = compilation.unwrap().diagnostic.unwrap();
    assert!(diagnostic.listing.is_none());
    assert_eq!(errors.len(), 2);
}

#[test]
#[serial]
fn test_quiet_compile_logs_nothing() {
    let (_mock, context) = contexts();
    let mut compilation = None;
    let errors = capture_errors(|| {
        compilation = Some(verbose(false).compile(&context, ShaderStage::Fragment, FP40, "ps_main", UNIT));
    });
    assert!(compilation.unwrap().diagnostic.is_some());
    assert!(errors.is_empty());
}

// ============================================================================
// Lifetime
// ============================================================================

#[test]
fn test_drop_releases_valid_program() {
    let (mock, context) = contexts();
    let compilation = ShaderCompiler::default()
        .compile(&context, ShaderStage::Vertex, VP40, "vs_main", UNIT);
    let handle = compilation.program.handle();
    compilation.program.load();
    assert_eq!(mock.live_program_count(), 1);

    drop(compilation);

    assert_eq!(mock.live_program_count(), 0);
    let calls = mock.calls();
    assert_eq!(calls[1], ContextCall::LoadProgram(handle));
    assert_eq!(calls.last(), Some(&ContextCall::DestroyProgram(handle)));
}

#[test]
fn test_drop_skips_null_program() {
    let (mock, context) = contexts();
    let compilation = ShaderCompiler::default()
        .compile(&context, ShaderStage::Vertex, VP40, "missing", UNIT);
    drop(compilation);
    assert!(!mock.calls().iter().any(|c| matches!(c, ContextCall::DestroyProgram(_))));
}
