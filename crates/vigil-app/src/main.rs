//! # vigil
//!
//! Vigil 모니터 바이너리 진입점.
//! 설정 로드, 로깅 초기화, 어댑터 DI 와이어링 후 스케줄러를 실행한다.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use vigil_app::aggregator::TelemetryAggregator;
use vigil_app::lifecycle::LifecycleManager;
use vigil_app::scheduler::{Scheduler, SchedulerConfig};
use vigil_core::config::{AppConfig, LoggingConfig};
use vigil_core::config_manager::ConfigManager;
use vigil_core::ports::monitor::{ProcessMonitor, SystemMonitor};
use vigil_core::ports::storage::SnapshotStore;
use vigil_monitor::host::HostSampler;
use vigil_monitor::locator::ProcessLocator;
use vigil_monitor::process::ProcessTracker;
use vigil_monitor::system::SysInfoMonitor;
use vigil_network::health::HealthProbe;
use vigil_storage::snapshot_file::SnapshotFileStorage;

/// 서비스 모니터
///
/// 호스트 리소스, HTTP 헬스, 서비스 프로세스를 주기적으로 수집한다.
#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 프로브 대상 URL (기본: http://localhost:8000)
    #[arg(long, short = 'u')]
    url: Option<String>,

    /// 라운드 간격 (초, 기본: 5)
    #[arg(long, short = 'i')]
    interval: Option<u64>,

    /// 터미널 출력 억제
    #[arg(long, short = 'q')]
    quiet: bool,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 스냅샷 저장 파일 경로
    #[arg(long)]
    stats_file: Option<PathBuf>,

    /// 감시 대상 실행 파일 이름 (부분 일치)
    #[arg(long)]
    process_name: Option<String>,

    /// 명령줄에 포함된 엔트리포인트 파일명
    #[arg(long)]
    entry_point: Option<String>,

    /// 프로브 타임아웃 (밀리초)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l')]
    log_level: Option<String>,

    /// 로그 파일 기록 비활성화
    #[arg(long)]
    no_log_file: bool,
}

impl Args {
    /// CLI 인자로 설정 오버라이드
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ref url) = self.url {
            config.probe.url = url.clone();
        }
        if let Some(interval) = self.interval {
            config.monitor.interval_secs = interval;
        }
        if let Some(ref path) = self.stats_file {
            config.storage.stats_file = path.clone();
        }
        if let Some(ref name) = self.process_name {
            config.process.name_filter = name.clone();
        }
        if let Some(ref entry) = self.entry_point {
            config.process.entry_point = entry.clone();
        }
        if let Some(timeout) = self.timeout_ms {
            config.probe.timeout_ms = timeout;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if self.no_log_file {
            config.logging.log_file = None;
        }
    }
}

/// 설정 로드 (파일 → CLI 오버라이드 → 검증)
fn load_config(args: &Args) -> Result<AppConfig> {
    let manager = match args.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    }
    .context("설정 로드 실패")?;

    let mut config = manager.get();
    args.apply(&mut config);
    config.validate().context("설정 검증 실패")?;
    Ok(config)
}

/// tracing 초기화 (콘솔 + 선택적 파일)
///
/// 반환된 가드는 프로세스 종료까지 유지해야 파일 로그가 flush된다.
fn init_tracing(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let level = &logging.level;
    let log_filter = format!(
        "vigil={level},vigil_app={level},vigil_core={level},vigil_monitor={level},vigil_network={level},vigil_storage={level}"
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    let (file_layer, guard) = match logging.log_file {
        Some(ref path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| anyhow!("로그 파일 이름이 없음: {}", path.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name.to_string_lossy().into_owned())
                .build(dir)
                .with_context(|| format!("로그 파일 열기 실패: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("tracing 초기화 실패: {e}"))?;

    Ok(guard)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let _log_guard = init_tracing(&config.logging)?;

    info!("Vigil 모니터 시작");
    info!("프로브 대상: {}", config.probe.url);
    info!(
        "프로세스 시그니처: name~{:?}, entry~{:?}",
        config.process.name_filter, config.process.entry_point
    );

    // ── 어댑터 생성 (DI 와이어링) ──

    // 1. 호스트 샘플러
    let system_monitor: Arc<dyn SystemMonitor> = Arc::new(SysInfoMonitor::new(
        config.monitor.disk_path.clone(),
        config.cpu_sample_window(),
    ));
    let host = HostSampler::new(system_monitor, config.monitor.history_capacity);

    let static_info = host.static_info();
    info!(
        "호스트: {} / CPU {}개 / 메모리 {:.1}GB",
        static_info.platform, static_info.cpu_count, static_info.memory_total_gb
    );

    // 2. 헬스 프로브
    let probe = HealthProbe::new(
        &config.probe.url,
        config.probe_timeout(),
        config.monitor.history_capacity,
        config.monitor.error_capacity,
    )?;

    // 3. 프로세스 탐색기
    let process_monitor: Arc<dyn ProcessMonitor> = Arc::new(ProcessTracker::new());
    let locator = ProcessLocator::new(
        process_monitor,
        config.process.name_filter.clone(),
        config.process.entry_point.clone(),
    );

    // 4. 스냅샷 저장소
    let store: Arc<dyn SnapshotStore> =
        Arc::new(SnapshotFileStorage::new(config.storage.stats_file.clone()));
    info!("스냅샷 파일: {}", config.storage.stats_file.display());

    // 5. 집계기
    let aggregator =
        TelemetryAggregator::new(host, probe, locator, store, config.alerts.clone());

    // 6. 라이프사이클 (시그널 핸들러는 스케줄러 시작 전에 등록)
    let lifecycle = Arc::new(LifecycleManager::new());
    lifecycle
        .spawn_signal_handler()
        .context("시그널 핸들러 등록 실패")?;

    // 7. 스케줄러
    let mut scheduler = Scheduler::new(
        SchedulerConfig {
            interval: config.interval(),
            quiet: args.quiet,
        },
        aggregator,
    );

    info!("Ctrl+C로 종료");
    scheduler.run(lifecycle.subscribe()).await;

    info!("Vigil 모니터 종료");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // tracing 초기화 전에 실패할 수 있으므로 stderr에도 출력
            error!("치명적 오류: {e:#}");
            eprintln!("치명적 오류: {e:#}");
            ExitCode::FAILURE
        }
    }
}
