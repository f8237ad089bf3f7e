mod viewer;

fn main() {
    viewer::app::run();
}
