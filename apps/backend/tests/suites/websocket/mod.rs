mod helpers;
mod timer;
