use std::env;

use fruitclass::{detect_circles, HoughParams};

fn main() {
    let path = env::args().nth(1).expect("no image path");

    let image = image::open(path).unwrap().to_luma8();
    let circles = detect_circles(&image, &HoughParams::default());

    println!("{} circle(s)", circles.len());
    for circle in &circles {
        println!(
            "({:.1}, {:.1}) r={:.1} votes={}",
            circle.center_x, circle.center_y, circle.radius, circle.votes
        );
    }
}
