//! Texture table
//!
//! Textures are opaque path strings to the simulation. Only their pixel size
//! matters here, since sprite bounds drive collisions.

/// A texture path with its native pixel size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    pub path: &'static str,
    pub width: f32,
    pub height: f32,
}

impl Texture {
    pub const fn new(path: &'static str, width: f32, height: f32) -> Self {
        Self {
            path,
            width,
            height,
        }
    }
}

pub const PLAYER_SHIP: Texture = Texture::new("/kssr/PNG/playerShip1_blue.png", 99.0, 75.0);
pub const PLAYER_LASER: Texture = Texture::new("/kssr/PNG/Lasers/laserBlue01.png", 9.0, 54.0);

pub const RED_ENEMIES: [Texture; 5] = [
    Texture::new("/kssr/PNG/Enemies/enemyRed1.png", 93.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyRed2.png", 104.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyRed3.png", 103.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyRed4.png", 82.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyRed5.png", 97.0, 84.0),
];

pub const BLUE_ENEMIES: [Texture; 5] = [
    Texture::new("/kssr/PNG/Enemies/enemyBlue1.png", 93.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyBlue2.png", 104.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyBlue3.png", 103.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyBlue4.png", 82.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyBlue5.png", 97.0, 84.0),
];

pub const GREEN_ENEMIES: [Texture; 5] = [
    Texture::new("/kssr/PNG/Enemies/enemyGreen1.png", 93.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyGreen2.png", 104.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyGreen3.png", 103.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyGreen4.png", 82.0, 84.0),
    Texture::new("/kssr/PNG/Enemies/enemyGreen5.png", 97.0, 84.0),
];

pub const RED_LASER: Texture = Texture::new("/kssr/PNG/Lasers/laserRed05.png", 13.0, 37.0);
pub const BLUE_LASER: Texture = Texture::new("/kssr/PNG/Lasers/laserBlue03.png", 9.0, 37.0);
pub const GREEN_LASER: Texture = Texture::new("/kssr/PNG/Lasers/laserGreen04.png", 13.0, 37.0);
