// =============================================================================
// SVC LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging da camada de dispatch com custo ZERO em release.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - Emite pela fachada `log`: quem embarca a camada escolhe o backend
//   (serial, ring buffer, env_logger nos testes do host...)
// - SEM alocação no caminho do macro
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Falhas fatais ou updates rejeitados pelo renderer
// - WARN:  Situações suspeitas mas recuperáveis
// - INFO:  Ciclo de vida (criação/disposal de serviços)
// - DEBUG: Comandos não encontrados, handles publicados
// - TRACE: Cada request, cada buffer copiado
//
// FEATURES:
// - no_logs:   Remove 100% dos logs
// - log_error: ERROR, WARN
// - log_info:  ERROR, WARN, INFO
// - log_debug: ERROR, WARN, INFO, DEBUG
// - log_trace: Todos os níveis (padrão)
//
// COMO USAR:
//   kinfo!("(Service) Instância criada");
//   ktrace!("(Dispatch) cmd={} version={}", id, version);
//
// =============================================================================

/// Target usado em todos os registros emitidos pela camada.
pub const TARGET: &str = "svc";

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($($arg:tt)+) => {
        $crate::__log::error!(target: $crate::logging::TARGET, $($arg)+)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)+) => {
        $crate::__log::warn!(target: $crate::logging::TARGET, $($arg)+)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(any(feature = "log_trace", feature = "log_debug", feature = "log_info"))]
#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)+) => {
        $crate::__log::info!(target: $crate::logging::TARGET, $($arg)+)
    };
}

#[cfg(not(any(feature = "log_trace", feature = "log_debug", feature = "log_info")))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(any(feature = "log_trace", feature = "log_debug"))]
#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)+) => {
        $crate::__log::debug!(target: $crate::logging::TARGET, $($arg)+)
    };
}

#[cfg(not(any(feature = "log_trace", feature = "log_debug")))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(feature = "log_trace")]
#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)+) => {
        $crate::__log::trace!(target: $crate::logging::TARGET, $($arg)+)
    };
}

#[cfg(not(feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}
