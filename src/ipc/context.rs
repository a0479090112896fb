//! # Request Context
//!
//! Estado mutável de uma chamada em andamento. Pertence a um único request
//! e nunca é compartilhado entre chamadas.

use crate::config::MAX_DESCRIPTORS;
use crate::ipc::abi::{BufferDescriptor, RequestReader, ResponseWriter};
use crate::ipc::error::{DescriptorKind, FatalError, FatalResult};
use crate::ipc::handle::{HandleBroker, KernelHandleTable};
use crate::ipc::marshal::BufferMarshaler;
use crate::mm::GuestMemory;

/// Lista ordenada de descritores de uma direção.
///
/// Cada índice pode ser consumido no máximo uma vez. Só os primeiros
/// `MAX_DESCRIPTORS` são endereçáveis; o excedente é ignorado até um handler
/// pedir por ele.
#[derive(Debug)]
pub struct DescriptorList<'a> {
    kind: DescriptorKind,
    descriptors: &'a [BufferDescriptor],
    consumed: u32,
}

impl<'a> DescriptorList<'a> {
    pub fn new(kind: DescriptorKind, descriptors: &'a [BufferDescriptor]) -> Self {
        Self {
            kind,
            descriptors,
            consumed: 0,
        }
    }

    /// Consome o descritor `index`.
    pub fn take(&mut self, index: usize) -> FatalResult<BufferDescriptor> {
        let kind = self.kind;
        if index >= MAX_DESCRIPTORS {
            return Err(FatalError::MissingDescriptor { kind, index });
        }
        let desc = *self
            .descriptors
            .get(index)
            .ok_or(FatalError::MissingDescriptor { kind, index })?;

        let bit = 1u32 << index;
        if self.consumed & bit != 0 {
            return Err(FatalError::DescriptorReused { kind, index });
        }
        self.consumed |= bit;
        Ok(desc)
    }

    /// Descritores enviados pelo guest
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Quantos já foram consumidos
    pub fn consumed(&self) -> usize {
        self.consumed.count_ones() as usize
    }
}

/// Contexto de um request
pub struct RequestContext<'a> {
    /// Cursor sobre os escalares de entrada
    pub request: RequestReader<'a>,
    /// Cursor sobre a resposta
    pub response: ResponseWriter,
    /// Buffers guest -> host
    pub send: DescriptorList<'a>,
    /// Buffers host -> guest
    pub receive: DescriptorList<'a>,
    memory: &'a dyn GuestMemory,
    handles: &'a dyn KernelHandleTable,
}

impl<'a> RequestContext<'a> {
    pub fn new(
        scalar_input: &'a [u8],
        send: &'a [BufferDescriptor],
        receive: &'a [BufferDescriptor],
        memory: &'a dyn GuestMemory,
        handles: &'a dyn KernelHandleTable,
    ) -> Self {
        Self {
            request: RequestReader::new(scalar_input),
            response: ResponseWriter::new(),
            send: DescriptorList::new(DescriptorKind::Send, send),
            receive: DescriptorList::new(DescriptorKind::Receive, receive),
            memory,
            handles,
        }
    }

    /// Marshaler sobre a memória do guest deste request
    pub fn marshaler(&self) -> BufferMarshaler<'a> {
        BufferMarshaler::new(self.memory)
    }

    /// Broker sobre a tabela de handles do processo que fez o request
    pub fn handles(&self) -> HandleBroker<'a> {
        HandleBroker::new(self.handles)
    }

    /// Descritores consumidos nas duas direções
    pub fn descriptors_consumed(&self) -> usize {
        self.send.consumed() + self.receive.consumed()
    }

    pub fn into_response(self) -> ResponseWriter {
        self.response
    }
}
