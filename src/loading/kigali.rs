use crate::model::{BusRoute, Stop};

/// The Nyabugogo → Kimironko line, the route this system ships with
pub fn kigali_route() -> BusRoute {
    let stops = vec![
        Stop::new(
            "Nyabugogo",
            -1.939826787816454,
            30.0445426438232,
            "Starting Point",
        ),
        Stop::new("Stop A", -1.9355377074007851, 30.060163829002217, ""),
        Stop::new("Stop B", -1.9358808342336546, 30.08024820994666, ""),
        Stop::new("Stop C", -1.9489196023037583, 30.092607828989397, ""),
        Stop::new("Stop D", -1.9592132952818164, 30.106684061788073, ""),
        Stop::new("Stop E", -1.9487480402200394, 30.126596781356923, ""),
        Stop::new(
            "Kimironko",
            -1.9365670876910166,
            30.13020167024439,
            "Ending Point",
        ),
    ];

    BusRoute::new(stops).expect("the built-in route has seven stops")
}
