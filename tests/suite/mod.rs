mod counting;
mod rollback;
mod scenario;
mod undo;
