//! # Service Instances
//!
//! Dono do objeto de negócio de um serviço e ponto de entrada do transporte.
//!
//! ## 🏗️ Ciclo de Vida
//!
//! ```text
//! Active ──dispose()──▶ Disposed   (one-way, terminal)
//! ```
//!
//! - Dispatch segura o lado de leitura de um `RwLock` ("ainda ativo").
//! - Disposal pega o lado de escrita: espera dispatches em voo terminarem e
//!   descarta o objeto de negócio exatamente uma vez.
//! - Dispatch depois do disposal é erro de programação do transporte e
//!   retorna `FatalError::ServiceDisposed`.

use spin::RwLock;

use crate::ipc::dispatch::{Caller, Command, CommandDispatcher, CommandTable, Request, Response};
use crate::ipc::error::{FatalError, FatalResult};

/// Serviço exposto ao guest.
///
/// Handlers recebem `&Self`: o serviço cuida da própria sincronização
/// interna se o objeto de negócio exigir exclusividade.
pub trait Service: Send + Sync + Sized + 'static {
    /// Nome para logs
    const NAME: &'static str;

    /// Catálogo de comandos (id, gate de versão, handler)
    const COMMANDS: &'static [Command<Self>];

    /// Descarta o objeto de negócio. Chamado no máximo uma vez.
    fn dispose(&mut self);
}

/// Instância viva de um serviço
pub struct ServiceInstance<S: Service> {
    service: RwLock<Option<S>>,
    dispatcher: CommandDispatcher<S>,
}

impl<S: Service> ServiceInstance<S> {
    pub fn new(service: S) -> Self {
        crate::kinfo!(
            "(Service) {} criado com {} comandos",
            S::NAME,
            S::COMMANDS.len()
        );
        Self {
            service: RwLock::new(Some(service)),
            dispatcher: CommandDispatcher::new(CommandTable::new(S::COMMANDS)),
        }
    }

    /// Despacha um request do transporte.
    ///
    /// Síncrono: todas as cópias de buffer terminam antes do retorno.
    pub fn dispatch(&self, caller: Caller<'_>, request: &Request<'_>) -> FatalResult<Response> {
        let guard = self.service.read();
        let Some(service) = guard.as_ref() else {
            crate::kerror!(
                "(Service) {} cmd={} depois do disposal",
                S::NAME,
                request.command_id
            );
            return Err(FatalError::ServiceDisposed);
        };
        self.dispatcher.handle_request(service, caller, request)
    }

    /// Descarta o serviço. Retorna `true` só na chamada que efetivamente
    /// descartou; chamadas seguintes não fazem nada.
    pub fn dispose(&self) -> bool {
        let mut guard = self.service.write();
        match guard.take() {
            Some(mut service) => {
                service.dispose();
                crate::kinfo!("(Service) {} descartado", S::NAME);
                true
            }
            None => false,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.service.read().is_none()
    }

    /// Tabela de comandos do serviço
    pub fn commands(&self) -> &CommandTable<S> {
        self.dispatcher.table()
    }

    /// Acesso direto ao objeto enquanto ativo
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.service.read().as_ref().map(f)
    }
}

impl<S: Service> Drop for ServiceInstance<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::abi::GuestVersion;
    use crate::ipc::context::RequestContext;
    use crate::ipc::dispatch::HandlerResult;
    use crate::ipc::handle::ProcessHandleTable;
    use crate::ipc::result::ResultCode;
    use crate::mm::RegionMap;
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicUsize, Ordering};

    struct Probe {
        disposals: Arc<AtomicUsize>,
    }

    fn ping(_: &Probe, _: &mut RequestContext<'_>) -> HandlerResult {
        Ok(ResultCode::Success)
    }

    impl Service for Probe {
        const NAME: &'static str = "probe";
        const COMMANDS: &'static [Command<Self>] = &[Command::new(0, "Ping", ping)];

        fn dispose(&mut self) {
            self.disposals.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_dispose_exactly_once() {
        let disposals = Arc::new(AtomicUsize::new(0));
        let instance = ServiceInstance::new(Probe {
            disposals: disposals.clone(),
        });

        assert!(instance.dispose());
        assert!(!instance.dispose());
        assert!(!instance.dispose());
        drop(instance);

        assert_eq!(disposals.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_disposes() {
        let disposals = Arc::new(AtomicUsize::new(0));
        drop(ServiceInstance::new(Probe {
            disposals: disposals.clone(),
        }));
        assert_eq!(disposals.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_after_dispose_is_fatal() {
        let instance = ServiceInstance::new(Probe {
            disposals: Arc::new(AtomicUsize::new(0)),
        });
        let memory = RegionMap::new();
        let handles = ProcessHandleTable::with_capacity(1);
        let caller = Caller::new(&memory, &handles);
        let request = Request::new(0, GuestVersion::BASE);

        assert_eq!(instance.dispatch(caller, &request).unwrap().result, ResultCode::Success);
        instance.dispose();
        assert!(instance.is_disposed());
        assert_eq!(instance.dispatch(caller, &request), Err(FatalError::ServiceDisposed));
    }
}
