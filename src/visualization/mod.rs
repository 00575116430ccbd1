pub mod pendsim_vis2d;
