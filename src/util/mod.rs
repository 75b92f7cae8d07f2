pub(crate) mod park;
