// Repository functions are generic over `S: KeyValueStore + ?Sized` so they
// work with any backend, including trait objects.

pub mod daily;
pub mod errors;
pub mod history;
