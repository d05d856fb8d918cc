use std::io::Write;

/// Host-provided execution context.
///
/// The interpreter writes all `print` output through the stream returned by
/// [`Context::output`]. The host owns the stream and must not write to it
/// while an execution is in progress.
pub trait Context {
    fn output(&mut self) -> &mut dyn Write;
}

/// Context forwarding program output to an arbitrary writer.
pub struct WriterContext<W: Write> {
    output: W,
}

impl<W: Write> WriterContext<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Consumes the context and hands the writer back to the host.
    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> Context for WriterContext<W> {
    fn output(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

/// In-memory context with read-back, for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct BufferContext {
    buffer: Vec<u8>,
}

impl BufferContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything the program has printed so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }
}

impl Context for BufferContext {
    fn output(&mut self) -> &mut dyn Write {
        &mut self.buffer
    }
}
