pub type CmdResult<T> = verstamp::Result<(T, i32)>;

pub mod update;
