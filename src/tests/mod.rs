mod linear_path_test;
mod plot_test;
