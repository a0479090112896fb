//! # Command Table
//!
//! Tabela estática de handlers indexada por id de comando.
//!
//! Cada serviço declara a sua como `&'static [Command<Self>]`, construída uma
//! vez em tempo de compilação. Um mesmo id pode aparecer mais de uma vez
//! desde que as faixas de versão não se sobreponham.

use crate::ipc::abi::GuestVersion;
use crate::ipc::context::RequestContext;
use crate::ipc::error::FatalResult;
use crate::ipc::result::ResultCode;

/// Resultado de um handler: código de domínio, ou erro fatal
pub type HandlerResult = FatalResult<ResultCode>;

/// Tipo de handler de comando
pub type CommandHandler<S> = fn(&S, &mut RequestContext<'_>) -> HandlerResult;

/// Entrada da tabela
pub struct Command<S> {
    /// Id no fio
    pub id: u32,
    /// Nome para logs
    pub name: &'static str,
    /// Versão mínima do guest (inclusiva)
    pub min_version: Option<GuestVersion>,
    /// Versão máxima do guest (inclusiva)
    pub max_version: Option<GuestVersion>,
    pub handler: CommandHandler<S>,
}

impl<S> Command<S> {
    pub const fn new(id: u32, name: &'static str, handler: CommandHandler<S>) -> Self {
        Self {
            id,
            name,
            min_version: None,
            max_version: None,
            handler,
        }
    }

    /// Disponível a partir de `version`
    pub const fn since(mut self, version: GuestVersion) -> Self {
        self.min_version = Some(version);
        self
    }

    /// Disponível até `version`
    pub const fn until(mut self, version: GuestVersion) -> Self {
        self.max_version = Some(version);
        self
    }

    /// Verifica se o comando existe para um guest nesta versão
    pub fn is_available(&self, version: GuestVersion) -> bool {
        version.within(self.min_version, self.max_version)
    }

    fn overlaps(&self, other: &Self) -> bool {
        let lo = |c: &Self| c.min_version.unwrap_or(GuestVersion::new(0, 0, 0));
        let hi = |c: &Self| c.max_version.unwrap_or(GuestVersion::LATEST);
        self.id == other.id && lo(self) <= hi(other) && lo(other) <= hi(self)
    }
}

/// Tabela de comandos de um serviço
pub struct CommandTable<S: 'static> {
    commands: &'static [Command<S>],
}

impl<S: 'static> CommandTable<S> {
    /// Monta a tabela. Em debug, verifica que nenhum par de entradas divide
    /// id com faixas de versão sobrepostas.
    pub fn new(commands: &'static [Command<S>]) -> Self {
        if cfg!(debug_assertions) {
            for (i, a) in commands.iter().enumerate() {
                for b in &commands[i + 1..] {
                    debug_assert!(
                        !a.overlaps(b),
                        "comandos {} e {} sobrepõem o id {}",
                        a.name,
                        b.name,
                        a.id
                    );
                }
            }
        }
        Self { commands }
    }

    /// Resolve `id` para um guest em `version`.
    ///
    /// Um id existente mas fora da faixa de versão se comporta exatamente
    /// como um id inexistente.
    pub fn resolve(&self, id: u32, version: GuestVersion) -> Option<&'static Command<S>> {
        self.commands
            .iter()
            .find(|command| command.id == id && command.is_available(version))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Command<S>> {
        self.commands.iter()
    }
}
