// End-to-end browse runs against real folders and icon handling.
mod icon;
mod scenario;
