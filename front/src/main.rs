fn main() {
    front::run();
}
