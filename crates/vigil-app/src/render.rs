//! 터미널 요약 출력.

use std::fmt::Write;
use vigil_core::models::snapshot::Snapshot;

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => "n/a".to_string(),
    }
}

/// 스냅샷을 여러 줄 요약 문자열로 변환
///
/// 프로세스 섹션은 감시 대상 프로세스가 발견된 경우에만 포함된다.
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let status = if snapshot.application.is_alive {
        "🟢"
    } else {
        "🔴"
    };

    // String에 대한 write!는 실패하지 않는다
    let _ = writeln!(out, "애플리케이션 상태: {status}");

    let _ = writeln!(out, "\n시스템 리소스:");
    let _ = writeln!(out, "CPU: {}", percent(snapshot.system.cpu_percent));
    let _ = writeln!(out, "메모리: {}", percent(snapshot.system.memory_percent));
    let _ = writeln!(out, "디스크: {}", percent(snapshot.system.disk_percent));

    if let Some(process) = snapshot.process.info() {
        let _ = writeln!(out, "\n프로세스:");
        let _ = writeln!(out, "PID: {}", process.pid);
        let _ = writeln!(out, "CPU: {:.1}%", process.cpu_percent);
        let _ = writeln!(out, "메모리: {:.1} MB", process.memory_rss);
        let _ = writeln!(out, "스레드: {}", process.threads);
    }

    let _ = writeln!(out, "\n성능:");
    let _ = writeln!(
        out,
        "평균 응답 시간: {:.1} ms",
        snapshot.application.avg_response_time * 1000.0
    );
    let _ = write!(out, "에러율: {:.1}%", snapshot.application.error_rate);

    out
}
