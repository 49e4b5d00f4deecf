pub mod drawing;
pub mod params;

pub mod geometry {
    use glam::DVec2;
    use serde::{Deserialize, Serialize};

    /// 二维点，内部以 `glam::DVec2` 表示，单位统一为毫米。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point2(pub DVec2);

    impl Point2 {
        #[inline]
        pub fn new(x: f64, y: f64) -> Self {
            Self(DVec2::new(x, y))
        }

        #[inline]
        pub fn from_vec(vec: DVec2) -> Self {
            Self(vec)
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn translate(self, offset: Vector2) -> Self {
            Self(self.0 + offset.0)
        }

        #[inline]
        pub fn vector_to(self, other: Point2) -> Vector2 {
            Vector2(other.0 - self.0)
        }

        #[inline]
        pub fn distance(self, other: Point2) -> f64 {
            self.0.distance(other.0)
        }

        #[inline]
        pub fn as_vec2(self) -> DVec2 {
            self.0
        }
    }

    impl From<DVec2> for Point2 {
        fn from(value: DVec2) -> Self {
            Self::from_vec(value)
        }
    }

    /// 二维向量，图纸布局中用作视图偏移量。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Vector2(pub DVec2);

    impl Vector2 {
        #[inline]
        pub fn new(x: f64, y: f64) -> Self {
            Self(DVec2::new(x, y))
        }

        #[inline]
        pub fn length(self) -> f64 {
            self.0.length()
        }

        #[inline]
        pub fn as_vec2(self) -> DVec2 {
            self.0
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }
    }

    impl From<DVec2> for Vector2 {
        fn from(value: DVec2) -> Self {
            Self(value)
        }
    }

    /// 轴对齐边界框，用于估算视图与整张图纸的范围。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Bounds2D {
        min: Point2,
        max: Point2,
    }

    impl Bounds2D {
        #[inline]
        pub fn new(min: Point2, max: Point2) -> Self {
            Self { min, max }
        }

        #[inline]
        pub fn empty() -> Self {
            Self {
                min: Point2::new(f64::INFINITY, f64::INFINITY),
                max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            }
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.min.x() > self.max.x() || self.min.y() > self.max.y()
        }

        #[inline]
        pub fn min(&self) -> Point2 {
            self.min
        }

        #[inline]
        pub fn max(&self) -> Point2 {
            self.max
        }

        #[inline]
        pub fn width(&self) -> f64 {
            self.max.x() - self.min.x()
        }

        #[inline]
        pub fn height(&self) -> f64 {
            self.max.y() - self.min.y()
        }

        pub fn include_point(&mut self, point: Point2) {
            if self.is_empty() {
                self.min = point;
                self.max = point;
                return;
            }
            let min_vec = self.min.as_vec2().min(point.as_vec2());
            let max_vec = self.max.as_vec2().max(point.as_vec2());
            self.min = Point2::from_vec(min_vec);
            self.max = Point2::from_vec(max_vec);
        }

        pub fn include_bounds(&mut self, other: &Bounds2D) {
            if other.is_empty() {
                return;
            }
            self.include_point(other.min);
            self.include_point(other.max);
        }

        /// 平移后的包围盒，空包围盒保持为空。
        pub fn translated(&self, offset: Vector2) -> Bounds2D {
            if self.is_empty() {
                return *self;
            }
            Bounds2D::new(self.min.translate(offset), self.max.translate(offset))
        }

        /// 判断两个包围盒的内部是否重叠，仅共享边界不算相交。
        pub fn intersects(&self, other: &Bounds2D) -> bool {
            if self.is_empty() || other.is_empty() {
                return false;
            }
            self.min.x() < other.max.x()
                && other.min.x() < self.max.x()
                && self.min.y() < other.max.y()
                && other.min.y() < self.max.y()
        }

        #[inline]
        pub fn center(&self) -> Point2 {
            debug_assert!(!self.is_empty());
            let min_vec = self.min.as_vec2();
            let max_vec = self.max.as_vec2();
            let center = (min_vec + max_vec) * 0.5;
            Point2::from_vec(center)
        }
    }

    /// 矩形：原点加宽高。Y 轴朝向取决于所在视图的坐标系。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Rect {
        pub origin: Point2,
        pub width: f64,
        pub height: f64,
    }

    impl Rect {
        #[inline]
        pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
            Self {
                origin: Point2::new(x, y),
                width,
                height,
            }
        }

        #[inline]
        pub fn x(&self) -> f64 {
            self.origin.x()
        }

        #[inline]
        pub fn y(&self) -> f64 {
            self.origin.y()
        }

        #[inline]
        pub fn max_x(&self) -> f64 {
            self.origin.x() + self.width
        }

        #[inline]
        pub fn max_y(&self) -> f64 {
            self.origin.y() + self.height
        }

        #[inline]
        pub fn center(&self) -> Point2 {
            Point2::new(
                self.origin.x() + self.width / 2.0,
                self.origin.y() + self.height / 2.0,
            )
        }

        /// 按顺时针（数学坐标系下为逆时针）返回四个角点。
        pub fn corners(&self) -> [Point2; 4] {
            [
                Point2::new(self.x(), self.y()),
                Point2::new(self.max_x(), self.y()),
                Point2::new(self.max_x(), self.max_y()),
                Point2::new(self.x(), self.max_y()),
            ]
        }

        pub fn bounds(&self) -> Bounds2D {
            let mut bounds = Bounds2D::empty();
            for corner in self.corners() {
                bounds.include_point(corner);
            }
            bounds
        }

        #[inline]
        pub fn translate(&self, offset: Vector2) -> Rect {
            Rect {
                origin: self.origin.translate(offset),
                ..*self
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Segment {
        pub start: Point2,
        pub end: Point2,
    }

    impl Segment {
        #[inline]
        pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
            Self {
                start: Point2::new(x1, y1),
                end: Point2::new(x2, y2),
            }
        }

        #[inline]
        pub fn length(&self) -> f64 {
            self.start.distance(self.end)
        }

        #[inline]
        pub fn translate(&self, offset: Vector2) -> Segment {
            Segment {
                start: self.start.translate(offset),
                end: self.end.translate(offset),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Circle {
        pub center: Point2,
        pub radius: f64,
    }

    impl Circle {
        #[inline]
        pub fn new(x: f64, y: f64, radius: f64) -> Self {
            Self {
                center: Point2::new(x, y),
                radius,
            }
        }

        #[inline]
        pub fn translate(&self, offset: Vector2) -> Circle {
            Circle {
                center: self.center.translate(offset),
                ..*self
            }
        }
    }

    /// 圆弧，角度以度数储存：起始角加扫掠角，正值沿数学正方向。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Arc {
        pub center: Point2,
        pub radius: f64,
        pub start_angle_deg: f64,
        pub span_deg: f64,
    }

    impl Arc {
        #[inline]
        pub fn new(x: f64, y: f64, radius: f64, start_angle_deg: f64, span_deg: f64) -> Self {
            Self {
                center: Point2::new(x, y),
                radius,
                start_angle_deg,
                span_deg,
            }
        }

        #[inline]
        pub fn end_angle_deg(&self) -> f64 {
            self.start_angle_deg + self.span_deg
        }

        pub fn point_at_deg(&self, angle_deg: f64) -> Point2 {
            let angle = angle_deg.to_radians();
            Point2::new(
                self.center.x() + self.radius * angle.cos(),
                self.center.y() + self.radius * angle.sin(),
            )
        }

        #[inline]
        pub fn translate(&self, offset: Vector2) -> Arc {
            Arc {
                center: self.center.translate(offset),
                ..*self
            }
        }
    }

    /// 带文字的定位点，旋转角以度数表示。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Label {
        pub position: Point2,
        pub text: String,
        pub rotation_deg: f64,
    }

    impl Label {
        #[inline]
        pub fn new(x: f64, y: f64, text: impl Into<String>, rotation_deg: f64) -> Self {
            Self {
                position: Point2::new(x, y),
                text: text.into(),
                rotation_deg,
            }
        }

        #[inline]
        pub fn translate(&self, offset: Vector2) -> Label {
            Label {
                position: self.position.translate(offset),
                text: self.text.clone(),
                rotation_deg: self.rotation_deg,
            }
        }
    }

}
