/// Destination for items produced by a pipeline.
///
/// Only ever driven from a single task, so implementations need not synchronize.
pub trait RecordSink<T>: Send + 'static {
    fn accept(&mut self, item: T);
}

impl<T: Send + 'static> RecordSink<T> for Vec<T> {
    fn accept(&mut self, item: T) {
        self.push(item);
    }
}
